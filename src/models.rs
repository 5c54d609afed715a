use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[serde(rename = "employeeId")]
    #[schema(example = "E2301")]
    pub employee_id: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "employeeId")]
    #[schema(example = "E2301")]
    pub employee_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthCheckResponse {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
    #[serde(rename = "employeeId", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}
