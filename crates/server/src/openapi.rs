use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct NewLeadDoc { pub name: String, pub phone: String, pub email: String, pub occupation: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserDoc {
    pub name: String,
    pub sex: String,
    pub month: String,
    pub day: String,
    pub year: String,
    pub country_code: String,
    pub phone: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatchDoc {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub year: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub days_available: Option<Vec<String>>,
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    /// e.g. `Daily`, `Weekly`, `Monthly`; not checked
    pub frequency: Option<String>,
    pub callbacks_per_day: Option<i64>,
    pub personal_context: Option<String>,
    pub receiving_calls: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::leads::list_leads,
        crate::routes::leads::create_lead,
        crate::routes::users::list_users,
        crate::routes::users::create_user,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            NewLeadDoc,
            NewUserDoc,
            UserPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "leads"),
        (name = "users")
    )
)]
pub struct ApiDoc;
