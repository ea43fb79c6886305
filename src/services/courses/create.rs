use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, validate::validate_create_course};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::courses::requests::CreateCourseRequest;
use crate::services::{current_school, internal_error};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let fallback_duration = AppConfig::get().schedule.default_task_duration;
    let (input, grade_level_ids) =
        match validate_create_course(&storage, &school, &course_data, fallback_duration).await {
            Ok(validated) => validated,
            Err(response) => return Ok(response),
        };

    match storage.create_course(input, &grade_level_ids).await {
        Ok(course) => {
            info!(
                "Course {} ({}) created in {} grade level(s)",
                course.name,
                course.uuid,
                grade_level_ids.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create course", e)),
    }
}
