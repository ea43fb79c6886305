use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolBreakService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn delete_school_break(
    service: &SchoolBreakService,
    request: &HttpRequest,
    school_break_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.delete_school_break(school.id, school_break_id).await {
        Ok(true) => {
            info!("School break {} deleted", school_break_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "School break deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::SchoolBreakNotFound, "School break not found")),
        Err(e) => Ok(internal_error("Failed to delete school break", e)),
    }
}
