//! Request handlers for the sponsorship API.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::SheetError;
use crate::query::{AssignmentFilter, MerchantQuery};

use super::AppState;

/// Error envelope returned on every failure path.
#[derive(Debug, Serialize)]
struct ErrorMessage {
    message: String,
}

/// Success envelope for assignment writes.
#[derive(Debug, Serialize)]
struct AssignmentResult {
    success: bool,
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct MerchantListParams {
    search: Option<String>,
    assignment: Option<AssignmentFilter>,
    category: Option<String>,
    #[serde(rename = "subCategory")]
    sub_category: Option<String>,
    /// `refresh=true` bypasses the cache; the UI's manual refresh button.
    refresh: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentBody {
    #[serde(rename = "merchantName")]
    merchant_name: String,
    #[serde(rename = "volunteerName")]
    volunteer_name: String,
}

/// Map a view criterion where the UI's `"all"` sentinel means no filter.
fn optional_filter(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && v != "all")
}

/// Build the view from request parameters. The category is set before the
/// sub-category because setting a category resets the sub-category.
fn query_from_params(params: &MerchantListParams) -> MerchantQuery {
    let mut query = MerchantQuery::new();
    if let Some(filter) = params.assignment {
        query.set_assignment(filter);
    }
    query.set_category(optional_filter(params.category.clone()));
    query.set_sub_category(optional_filter(params.sub_category.clone()));
    if let Some(search) = &params.search {
        query.set_search(search.clone());
    }
    query
}

/// Errors from reads are upstream problems; errors from the assignment flow
/// are client-visible rejections.
fn error_response(err: &SheetError) -> HttpResponse {
    let body = ErrorMessage {
        message: err.to_string(),
    };
    match err {
        SheetError::AssignmentLimitExceeded { .. } | SheetError::AssignmentRejected(_) => {
            HttpResponse::BadRequest().json(body)
        }
        SheetError::UpstreamUnavailable(_) | SheetError::EmptyDataset { .. } => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// `GET /merchants` with optional `search`, `assignment`, `category`,
/// `subCategory`, and `refresh` query parameters.
pub async fn list_merchants(
    state: web::Data<AppState>,
    params: web::Query<MerchantListParams>,
) -> impl Responder {
    let use_cache = !params.refresh.unwrap_or(false);

    match state.reader.fetch_merchants(use_cache).await {
        Ok(merchants) => {
            let query = query_from_params(&params);
            HttpResponse::Ok().json(query.filter(&merchants))
        }
        Err(e) => {
            error!(error = %e, "Merchant fetch failed");
            error_response(&e)
        }
    }
}

/// `GET /volunteers`. Never fails: a fetch problem degrades to an empty
/// suggestion list.
pub async fn list_volunteers(state: web::Data<AppState>) -> impl Responder {
    let volunteers = state.reader.fetch_volunteers().await;
    HttpResponse::Ok().json(volunteers)
}

/// `POST /assignments` with `{merchantName, volunteerName}`.
pub async fn create_assignment(
    state: web::Data<AppState>,
    body: web::Json<AssignmentBody>,
) -> impl Responder {
    if body.merchant_name.trim().is_empty() || body.volunteer_name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorMessage {
            message: "Merchant name and volunteer name are required".to_string(),
        });
    }

    match state
        .coordinator
        .assign(body.merchant_name.trim(), body.volunteer_name.trim())
        .await
    {
        Ok(message) => HttpResponse::Ok().json(AssignmentResult {
            success: true,
            message,
        }),
        Err(e) => {
            error!(error = %e, merchant = %body.merchant_name, "Assignment failed");
            error_response(&e)
        }
    }
}

/// `GET /assignments/{volunteerName}`.
pub async fn list_assignments(
    state: web::Data<AppState>,
    volunteer_name: web::Path<String>,
) -> impl Responder {
    match state.coordinator.assignments_for(&volunteer_name).await {
        Ok(merchants) => HttpResponse::Ok().json(merchants),
        Err(e) => {
            error!(error = %e, "Assignment lookup failed");
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Merchant;

    fn merchant(name: &str, category: &str, assigned_to: Option<&str>) -> Merchant {
        Merchant {
            id: format!("merchant_{}", name),
            business_name: name.to_string(),
            category: category.to_string(),
            sub_category: String::new(),
            address: String::new(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
            status: "active".to_string(),
            assigned_to: assigned_to.map(str::to_string),
            icon: "🏢".to_string(),
        }
    }

    #[test]
    fn test_all_sentinel_means_no_filter() {
        let params = MerchantListParams {
            search: None,
            assignment: None,
            category: Some("all".to_string()),
            sub_category: Some("".to_string()),
            refresh: None,
        };
        let query = query_from_params(&params);
        assert_eq!(query.category(), None);
        assert_eq!(query.sub_category(), None);
    }

    #[test]
    fn test_params_compose_into_view() {
        let params = MerchantListParams {
            search: Some("piz".to_string()),
            assignment: Some(AssignmentFilter::Unassigned),
            category: Some("food".to_string()),
            sub_category: None,
            refresh: None,
        };
        let query = query_from_params(&params);
        let merchants = vec![
            merchant("Tony's Pizza", "food", None),
            merchant("Tony's Pizza II", "food", Some("X")),
            merchant("Pizza Mart", "retail", None),
        ];
        let result = query.filter(&merchants);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].business_name, "Tony's Pizza");
    }

    #[test]
    fn test_assignment_filter_deserializes_lowercase() {
        let params: MerchantListParams =
            serde_json::from_str(r#"{"assignment": "unassigned"}"#).unwrap();
        assert_eq!(params.assignment, Some(AssignmentFilter::Unassigned));
    }

    #[test]
    fn test_error_status_mapping() {
        let limit = SheetError::AssignmentLimitExceeded {
            volunteer: "Sarah".to_string(),
            count: 3,
            limit: 3,
        };
        assert_eq!(error_response(&limit).status(), 400);

        let rejected = SheetError::AssignmentRejected("nope".to_string());
        assert_eq!(error_response(&rejected).status(), 400);

        let upstream = SheetError::UpstreamUnavailable("timeout".to_string());
        assert_eq!(error_response(&upstream).status(), 500);

        let empty = SheetError::EmptyDataset {
            range: "Sheet1!A:L".to_string(),
        };
        assert_eq!(error_response(&empty).status(), 500);
    }
}
