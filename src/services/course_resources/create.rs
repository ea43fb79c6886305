use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseResourceService, check_resource};
use crate::models::ApiResponse;
use crate::models::course_resources::requests::CourseResourceRequest;
use crate::services::courses::load_course;
use crate::services::{current_school, internal_error};

pub async fn create_resource(
    service: &CourseResourceService,
    request: &HttpRequest,
    course_uuid: String,
    resource_data: CourseResourceRequest,
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

    let (title, details) = match check_resource(&resource_data) {
        Ok(fields) => fields,
        Err(errors) => return Ok(errors.to_response()),
    };

    match storage
        .create_course_resource(course.id, title, details)
        .await
    {
        Ok(resource) => {
            info!("Resource {} added to course {}", resource.uuid, course.uuid);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                resource,
                "Course resource created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create course resource", e)),
    }
}
