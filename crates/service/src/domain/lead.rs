use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A demo request submitted from the landing page. Never changes once stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub occupation: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lead form body. Missing fields are stored as empty strings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub occupation: String,
}

impl Lead {
    pub fn from_input(id: String, input: NewLead, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            phone: input.phone,
            email: input.email,
            occupation: input.occupation,
            created_at,
            extra: Map::new(),
        }
    }
}
