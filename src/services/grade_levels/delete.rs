use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeLevelService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn delete_grade_level(
    service: &GradeLevelService,
    request: &HttpRequest,
    grade_level_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.delete_grade_level(school.id, grade_level_id).await {
        Ok(true) => {
            info!("Grade level {} deleted", grade_level_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Grade level deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::GradeLevelNotFound, "Grade level not found")),
        Err(e) => Ok(internal_error("Failed to delete grade level", e)),
    }
}
