use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseTaskService, validate::validate_course_task};
use crate::models::ApiResponse;
use crate::models::course_tasks::requests::CourseTaskRequest;
use crate::services::courses::load_course;
use crate::services::{current_school, internal_error};

pub async fn create_task(
    service: &CourseTaskService,
    request: &HttpRequest,
    course_uuid: String,
    task_data: CourseTaskRequest,
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

    let input = match validate_course_task(
        &storage,
        course.id,
        &task_data,
        course.default_task_duration,
    )
    .await
    {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.create_course_task(course.id, input).await {
        Ok(task) => {
            info!(
                "Course task {} created at position {} in course {}",
                task.uuid, task.order, course.uuid
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                task,
                "Course task created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create course task", e)),
    }
}
