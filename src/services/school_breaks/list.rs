use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolBreakService;
use crate::models::school_breaks::requests::SchoolBreakListQuery;
use crate::models::school_breaks::responses::SchoolBreakListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn list_school_breaks(
    service: &SchoolBreakService,
    request: &HttpRequest,
    query: SchoolBreakListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage
        .list_school_breaks(school.id, query.school_year_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SchoolBreakListResponse { items },
            "School breaks retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list school breaks", e)),
    }
}

pub async fn get_school_break(
    service: &SchoolBreakService,
    request: &HttpRequest,
    school_break_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.get_school_break(school.id, school_break_id).await {
        Ok(Some(school_break)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            school_break,
            "School break retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SchoolBreakNotFound, "School break not found")),
        Err(e) => Ok(internal_error("Failed to load school break", e)),
    }
}
