use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseTaskService, load_task};
use crate::models::ApiResponse;
use crate::models::course_tasks::responses::CourseTaskListResponse;
use crate::services::courses::load_course;
use crate::services::{current_school, internal_error};

pub async fn list_tasks(
    service: &CourseTaskService,
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

    match storage.list_course_tasks(course.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseTaskListResponse {
                course_uuid: course.uuid,
                items,
            },
            "Course tasks retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list course tasks", e)),
    }
}

pub async fn get_task(
    service: &CourseTaskService,
    request: &HttpRequest,
    task_uuid: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match load_task(&storage, &school, &task_uuid).await {
        Ok(task) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            task,
            "Course task retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
