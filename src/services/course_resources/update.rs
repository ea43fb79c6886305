use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseResourceService, check_resource, load_resource};
use crate::models::course_resources::requests::CourseResourceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn update_resource(
    service: &CourseResourceService,
    request: &HttpRequest,
    resource_uuid: String,
    update_data: CourseResourceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let existing = match load_resource(&storage, &school, &resource_uuid).await {
        Ok(resource) => resource,
        Err(response) => return Ok(response),
    };

    let (title, details) = match check_resource(&update_data) {
        Ok(fields) => fields,
        Err(errors) => return Ok(errors.to_response()),
    };

    match storage
        .update_course_resource(existing.id, title, details)
        .await
    {
        Ok(Some(resource)) => {
            info!("Course resource {} updated", resource.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                resource,
                "Course resource updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::CourseResourceNotFound,
            "Course resource not found",
        )),
        Err(e) => Ok(internal_error("Failed to update course resource", e)),
    }
}
