use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseResourceService;
use crate::models::ApiResponse;
use crate::models::course_resources::responses::CourseResourceListResponse;
use crate::services::courses::load_course;
use crate::services::{current_school, internal_error};

pub async fn list_resources(
    service: &CourseResourceService,
    request: &HttpRequest,
    course_uuid: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let course = match load_course(&storage, &school, &course_uuid).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    match storage.list_course_resources(course.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseResourceListResponse {
                course_uuid: course.uuid,
                items,
            },
            "Course resources retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list course resources", e)),
    }
}
