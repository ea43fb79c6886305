use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, load_course};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

// 任务、资源、完成记录与成绩随课程一起删除
pub async fn delete_course(
    service: &CourseService,
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

    match storage.delete_course(course.id).await {
        Ok(true) => {
            info!("Course {} deleted", course.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(internal_error("Failed to delete course", e)),
    }
}
