use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Client profile managed from the internal app.
///
/// Identity and contact fields are set at creation. The scheduling fields
/// (`notes` through `receiving_calls`) stay absent from the stored JSON until
/// a patch supplies them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sex: String,
    /// Date of birth, kept as the three free-form strings the form submits.
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub phone: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_available: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callbacks_per_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving_calls: Option<bool>,
    /// Keys this type does not model, carried through reads and writes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registration form body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub sex: String,
    pub month: String,
    pub day: String,
    pub year: String,
    pub country_code: String,
    pub phone: String,
}

/// Partial update. Every key present in the body overwrites the stored
/// value; absent keys leave it alone. For the scheduling fields an explicit
/// `null` clears the value (`Some(None)`). `id`, `createdAt` and unknown keys
/// are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub days_available: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub from_time: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub to_time: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub callbacks_per_day: Option<Option<i64>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub personal_context: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub receiving_calls: Option<Option<bool>>,
}

/// A key that is present maps to `Some`, even when its value is `null`.
/// Absent keys never reach this and fall back to `Default` (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl User {
    pub fn from_input(id: String, input: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            sex: input.sex,
            month: input.month,
            day: input.day,
            year: input.year,
            country_code: input.country_code,
            phone: input.phone,
            created_at,
            notes: None,
            days_available: None,
            from_time: None,
            to_time: None,
            frequency: None,
            callbacks_per_day: None,
            personal_context: None,
            receiving_calls: None,
            extra: Map::new(),
        }
    }

    /// Shallow merge of `patch` into this record.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.sex {
            self.sex = v;
        }
        if let Some(v) = patch.month {
            self.month = v;
        }
        if let Some(v) = patch.day {
            self.day = v;
        }
        if let Some(v) = patch.year {
            self.year = v;
        }
        if let Some(v) = patch.country_code {
            self.country_code = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }

        if let Some(v) = patch.notes {
            self.notes = v;
        }
        if let Some(v) = patch.days_available {
            self.days_available = v;
        }
        if let Some(v) = patch.from_time {
            self.from_time = v;
        }
        if let Some(v) = patch.to_time {
            self.to_time = v;
        }
        if let Some(v) = patch.frequency {
            self.frequency = v;
        }
        if let Some(v) = patch.callbacks_per_day {
            self.callbacks_per_day = v;
        }
        if let Some(v) = patch.personal_context {
            self.personal_context = v;
        }
        if let Some(v) = patch.receiving_calls {
            self.receiving_calls = v;
        }
    }
}
