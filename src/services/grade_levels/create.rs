use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeLevelService, validate::validate_grade_level};
use crate::models::ApiResponse;
use crate::models::grade_levels::requests::GradeLevelRequest;
use crate::services::{current_school, internal_error};

pub async fn create_grade_level(
    service: &GradeLevelService,
    request: &HttpRequest,
    grade_level_data: GradeLevelRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let (school_year, name) =
        match validate_grade_level(&storage, &school, &grade_level_data).await {
            Ok(validated) => validated,
            Err(response) => return Ok(response),
        };

    match storage.create_grade_level(school_year.id, name).await {
        Ok(grade_level) => {
            info!(
                "Grade level {} created in school year {}",
                grade_level.name, school_year.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                grade_level,
                "Grade level created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create grade level", e)),
    }
}
