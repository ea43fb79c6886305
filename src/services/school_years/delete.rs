use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolYearService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn delete_school_year(
    service: &SchoolYearService,
    request: &HttpRequest,
    school_year_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.delete_school_year(school.id, school_year_id).await {
        Ok(true) => {
            info!("School year {} deleted", school_year_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "School year deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::SchoolYearNotFound, "School year not found")),
        Err(e) => Ok(internal_error("Failed to delete school year", e)),
    }
}
