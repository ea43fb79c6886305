use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, load_student};
use crate::models::ApiResponse;
use crate::models::students::requests::CompleteTaskRequest;
use crate::services::course_tasks::load_task;
use crate::services::{current_school, internal_error};

pub async fn complete_task(
    service: &StudentService,
    request: &HttpRequest,
    student_uuid: String,
    task_uuid: String,
    complete_data: CompleteTaskRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let student = match load_student(&storage, &school, &student_uuid).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let task = match load_task(&storage, &school, &task_uuid).await {
        Ok(task) => task,
        Err(response) => return Ok(response),
    };

    let completed_date = complete_data
        .completed_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match storage
        .complete_task(student.id, task.id, completed_date)
        .await
    {
        Ok(coursework) => {
            info!(
                "Student {} completed task {} on {}",
                student.uuid, task.uuid, completed_date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                coursework,
                "Task marked as complete",
            )))
        }
        Err(e) => Ok(internal_error("Failed to complete task", e)),
    }
}

// 未完成的任务也返回成功
pub async fn uncomplete_task(
    service: &StudentService,
    request: &HttpRequest,
    student_uuid: String,
    task_uuid: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let student = match load_student(&storage, &school, &student_uuid).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let task = match load_task(&storage, &school, &task_uuid).await {
        Ok(task) => task,
        Err(response) => return Ok(response),
    };

    match storage.uncomplete_task(student.id, task.id).await {
        Ok(removed) => {
            if removed {
                info!("Student {} task {} marked incomplete", student.uuid, task.uuid);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task marked as incomplete")))
        }
        Err(e) => Ok(internal_error("Failed to uncomplete task", e)),
    }
}
