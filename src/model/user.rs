use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    /// Stored and compared in plaintext; see the login handler.
    pub password: String,
}
