use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeLevelService, validate::validate_grade_level};
use crate::models::grade_levels::requests::GradeLevelRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn update_grade_level(
    service: &GradeLevelService,
    request: &HttpRequest,
    grade_level_id: i64,
    mut update_data: GradeLevelRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let existing = match storage.get_grade_level(school.id, grade_level_id).await {
        Ok(Some(grade_level)) => grade_level,
        Ok(None) => return Ok(not_found(ErrorCode::GradeLevelNotFound, "Grade level not found")),
        Err(e) => return Ok(internal_error("Failed to load grade level", e)),
    };

    update_data
        .school_year_id
        .get_or_insert(existing.school_year_id);

    let (school_year, name) = match validate_grade_level(&storage, &school, &update_data).await {
        Ok(validated) => validated,
        Err(response) => return Ok(response),
    };

    match storage
        .update_grade_level(existing.id, school_year.id, name)
        .await
    {
        Ok(Some(grade_level)) => {
            info!("Grade level {} updated", grade_level.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                grade_level,
                "Grade level updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::GradeLevelNotFound, "Grade level not found")),
        Err(e) => Ok(internal_error("Failed to update grade level", e)),
    }
}
