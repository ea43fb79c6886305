use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseTaskService, load_task};
use crate::models::{ApiResponse, ErrorCode, MoveRequest};
use crate::services::{current_school, internal_error, not_found};

pub async fn move_task(
    service: &CourseTaskService,
    request: &HttpRequest,
    task_uuid: String,
    move_request: MoveRequest,
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

    match storage.move_course_task(task.id, move_request.to).await {
        Ok(Some(moved)) => {
            info!(
                "Course task {} moved from {} to {}",
                moved.uuid, task.order, moved.order
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                moved,
                "Course task moved successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseTaskNotFound, "Course task not found")),
        Err(e) => Ok(internal_error("Failed to move course task", e)),
    }
}
