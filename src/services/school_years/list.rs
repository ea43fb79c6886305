use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolYearService;
use crate::models::ApiResponse;
use crate::models::school_years::responses::SchoolYearListResponse;
use crate::services::{current_school, internal_error};

pub async fn list_school_years(
    service: &SchoolYearService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.list_school_years(school.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SchoolYearListResponse { items },
            "School years retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list school years", e)),
    }
}
