//! Visitor counter endpoints.
//!
//! ```text
//! POST /api/visitor/visit   -> {"total": 3, "city": "Paris"}
//! GET  /api/visitor/count   -> {"total": 3, "cities": [{"city": "Paris", "count": 2}, ...]}
//! ```

use actix_web::{HttpRequest, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{VisitReceipt, VisitorRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::client_address::client_address;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Response to a recorded visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitResponse {
    /// Total visits including this one.
    #[schema(example = 3)]
    pub total: u64,
    /// City the visit was attributed to, or `Unknown`.
    #[schema(example = "Paris")]
    pub city: String,
}

impl From<VisitReceipt> for VisitResponse {
    fn from(receipt: VisitReceipt) -> Self {
        Self {
            total: receipt.total,
            city: receipt.location.into(),
        }
    }
}

/// Visits attributed to one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityCount {
    #[schema(example = "Paris")]
    pub city: String,
    #[schema(example = 2)]
    pub count: u64,
}

/// Aggregate counters, cities in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitorCountResponse {
    #[schema(example = 3)]
    pub total: u64,
    pub cities: Vec<CityCount>,
}

impl From<VisitorRecord> for VisitorCountResponse {
    fn from(record: VisitorRecord) -> Self {
        let cities = record
            .locations()
            .iter()
            .map(|(label, count)| CityCount {
                city: label.to_string(),
                count: *count,
            })
            .collect();
        Self {
            total: record.total(),
            cities,
        }
    }
}

/// Record one visit from the calling client.
#[utoipa::path(
    post,
    path = "/api/visitor/visit",
    tags = ["visitor"],
    operation_id = "recordVisit",
    responses(
        (status = 200, description = "Visit recorded", body = VisitResponse),
        (status = 500, description = "Counter store unavailable", body = ErrorBody)
    )
)]
#[post("/visitor/visit")]
pub async fn record_visit(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<VisitResponse>> {
    let receipt = state.visits.record_visit(client_address(&req)).await?;
    Ok(web::Json(receipt.into()))
}

/// Report the running totals.
#[utoipa::path(
    get,
    path = "/api/visitor/count",
    tags = ["visitor"],
    operation_id = "visitorCount",
    responses(
        (status = 200, description = "Current counters", body = VisitorCountResponse),
        (status = 500, description = "Counter store unavailable", body = ErrorBody)
    )
)]
#[get("/visitor/count")]
pub async fn visitor_count(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<VisitorCountResponse>> {
    let record = state.stats.fetch_stats().await?;
    Ok(web::Json(record.into()))
}
