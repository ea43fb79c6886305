use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseResourceService, load_resource};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn delete_resource(
    service: &CourseResourceService,
    request: &HttpRequest,
    resource_uuid: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let resource = match load_resource(&storage, &school, &resource_uuid).await {
        Ok(resource) => resource,
        Err(response) => return Ok(response),
    };

    match storage.delete_course_resource(resource.id).await {
        Ok(true) => {
            info!("Course resource {} deleted", resource.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Course resource deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::CourseResourceNotFound,
            "Course resource not found",
        )),
        Err(e) => Ok(internal_error("Failed to delete course resource", e)),
    }
}
