use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseTaskService, load_task};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn delete_task(
    service: &CourseTaskService,
    request: &HttpRequest,
    task_uuid: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let task = match load_task(&storage, &school, &task_uuid).await {
        Ok(task) => task,
        Err(response) => return Ok(response),
    };

    match storage.delete_course_task(task.id).await {
        Ok(true) => {
            info!("Course task {} deleted", task.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Course task deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseTaskNotFound, "Course task not found")),
        Err(e) => Ok(internal_error("Failed to delete course task", e)),
    }
}
