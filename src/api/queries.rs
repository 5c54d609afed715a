use std::collections::HashSet;
use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::{
    auth::auth::AuthUser,
    errors::ApiError,
    model::query::{DateFilter, NewQuery, Topic},
    search::{SearchFilter, search_queries},
    store::KbStore,
};

/// Filter parameters as the client sends them. The dropdowns submit
/// `all_topics`/`all_employees`/`all_time` sentinels for "no filter".
#[derive(Debug, Deserialize, ToSchema)]
pub struct QueryFilterParams {
    pub search: Option<String>,
    pub topic: Option<String>,
    pub employee: Option<String>,
    pub date: Option<String>,
}

impl QueryFilterParams {
    fn into_filter(self) -> SearchFilter {
        SearchFilter {
            search: self.search.filter(|s| !s.is_empty()),
            topic: self
                .topic
                .filter(|t| !t.is_empty() && t != "all_topics"),
            employee_id: self
                .employee
                .filter(|e| !e.is_empty() && e != "all_employees"),
            // Unknown date values (including all_time) disable the window.
            date: self
                .date
                .and_then(|d| DateFilter::from_str(&d).ok()),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateQueryReq {
    #[schema(example = "How do I reset my VPN token?")]
    pub title: String,
    pub details: String,
    pub answer: String,
    #[schema(example = "technical")]
    pub topic: String,
}

/// Search queries
#[utoipa::path(
    get,
    path = "/api/queries",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive term matched against title, details and answer"),
        ("topic" = Option<String>, Query, description = "Topic filter (technical/account/hardware/hr)"),
        ("employee" = Option<String>, Query, description = "Filter by author employee ID"),
        ("date" = Option<String>, Query, description = "Date window (today/week/month/year)")
    ),
    responses(
        (status = 200, description = "Matching queries, newest first", body = [crate::model::query::Query]),
        (status = 401, description = "No valid session")
    ),
    tag = "Queries"
)]
pub async fn list_queries(
    _auth: AuthUser,
    store: web::Data<KbStore>,
    params: web::Query<QueryFilterParams>,
) -> Result<impl Responder, ApiError> {
    debug!(params = ?params, "Query search");

    let filter = params.into_inner().into_filter();
    let records = store.queries_snapshot();
    let results = search_queries(&records, &filter, Local::now());

    debug!(matched = results.len(), "Query search complete");

    Ok(HttpResponse::Ok().json(results))
}

/// Submit a new query
#[utoipa::path(
    post,
    path = "/api/queries",
    request_body = CreateQueryReq,
    responses(
        (status = 201, description = "Query created", body = crate::model::query::Query),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "No valid session")
    ),
    tag = "Queries"
)]
pub async fn create_query(
    auth: AuthUser,
    store: web::Data<KbStore>,
    body: web::Json<CreateQueryReq>,
) -> Result<HttpResponse, ApiError> {
    let title = body.title.trim();
    let details = body.details.trim();
    let answer = body.answer.trim();

    // Validate everything before touching the store.
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }
    if details.is_empty() {
        return Err(ApiError::Validation("Details are required".to_string()));
    }
    if answer.is_empty() {
        return Err(ApiError::Validation("Answer is required".to_string()));
    }
    let topic = Topic::from_str(body.topic.trim())
        .map_err(|_| ApiError::Validation("A valid topic is required".to_string()))?;

    let query = store.append_query(
        NewQuery {
            title: title.to_string(),
            details: details.to_string(),
            answer: answer.to_string(),
            topic,
        },
        &auth.employee_id,
    )?;

    info!(query_id = query.id, employee_id = %query.employee_id, "Query created");

    Ok(HttpResponse::Created().json(query))
}

/// List employee IDs for the filter dropdown
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Unique employee IDs across all queries", body = [String]),
        (status = 401, description = "No valid session")
    ),
    tag = "Queries"
)]
pub async fn list_employees(
    _auth: AuthUser,
    store: web::Data<KbStore>,
) -> Result<impl Responder, ApiError> {
    let mut seen = HashSet::new();
    let mut employee_ids = Vec::new();

    // Newest-first listing, so the dropdown leads with recent authors.
    for query in store.list_queries() {
        if seen.insert(query.employee_id.clone()) {
            employee_ids.push(query.employee_id);
        }
    }

    Ok(HttpResponse::Ok().json(employee_ids))
}
