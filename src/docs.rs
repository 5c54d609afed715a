use crate::api::queries::{CreateQueryReq, QueryFilterParams};
use crate::model::query::{Query, Topic};
use crate::models::{AuthCheckResponse, LoginReqDto, LoginResponse};
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Knowledge Base Portal API",
        version = "1.0.0",
        description = r#"
## Internal Knowledge-Base Portal

This API powers the internal knowledge-base portal: employees log in,
search and filter a shared collection of question/answer entries
("queries"), and submit new ones.

### 🔹 Key Features
- **Session login** with an opaque cookie (24 hour expiry)
- **Query search** by text, topic, author and date window
- **Query submission**, attributed to the logged-in employee

### 🔐 Security
All query endpoints require a live session cookie obtained from `/api/login`.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::api::queries::list_queries,
        crate::api::queries::create_query,
        crate::api::queries::list_employees
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            AuthCheckResponse,
            Query,
            Topic,
            CreateQueryReq,
            QueryFilterParams
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session login/logout APIs"),
        (name = "Queries", description = "Knowledge-base query APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("kb_session"))),
            );
        }
    }
}
