use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, load_course, validate::validate_update_course};
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_uuid: String,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let existing = match load_course(&storage, &school, &course_uuid).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let input = match validate_update_course(&update_data, existing.default_task_duration) {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.update_course(existing.id, input).await {
        Ok(Some(course)) => {
            info!("Course {} updated", course.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                course,
                "Course updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(internal_error("Failed to update course", e)),
    }
}
