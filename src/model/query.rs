use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Closed topic vocabulary for knowledge-base entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Topic {
    Technical,
    Account,
    Hardware,
    Hr,
}

/// Relative date window used by the search filter.
///
/// Anything that does not parse to one of these (including the client's
/// `all_time` sentinel) disables date filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DateFilter {
    Today,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "title": "How to configure the project deployment settings?",
        "details": "I'm trying to set up the deployment pipeline.",
        "answer": "Go to Project Settings > Deployment > Configuration.",
        "topic": "technical",
        "employeeId": "E2301",
        "date": "2024-05-01T10:30:00Z"
    })
)]
pub struct Query {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "How to configure the project deployment settings?")]
    pub title: String,

    pub details: String,

    pub answer: String,

    #[schema(example = "technical")]
    pub topic: Topic,

    #[serde(rename = "employeeId")]
    #[schema(example = "E2301")]
    pub employee_id: String,

    /// Submission time, assigned by the server.
    #[schema(value_type = String, format = "date-time", example = "2024-05-01T10:30:00Z")]
    pub date: DateTime<Utc>,
}

/// Fields of a query before the store assigns id, author and date.
#[derive(Debug, Clone)]
pub struct NewQuery {
    pub title: String,
    pub details: String,
    pub answer: String,
    pub topic: Topic,
}
