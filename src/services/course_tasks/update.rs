use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseTaskService, load_task, validate::validate_course_task};
use crate::models::course_tasks::requests::CourseTaskRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn update_task(
    service: &CourseTaskService,
    request: &HttpRequest,
    task_uuid: String,
    update_data: CourseTaskRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let existing = match load_task(&storage, &school, &task_uuid).await {
        Ok(task) => task,
        Err(response) => return Ok(response),
    };

    // 省略时长则保留原值
    let input = match validate_course_task(
        &storage,
        existing.course_id,
        &update_data,
        existing.duration,
    )
    .await
    {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.update_course_task(existing.id, input).await {
        Ok(Some(task)) => {
            info!("Course task {} updated", task.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                task,
                "Course task updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseTaskNotFound, "Course task not found")),
        Err(e) => Ok(internal_error("Failed to update course task", e)),
    }
}
