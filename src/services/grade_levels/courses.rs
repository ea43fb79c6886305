use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeLevelService;
use crate::models::grade_levels::entities::GradeLevel;
use crate::models::grade_levels::responses::GradeLevelCoursesResponse;
use crate::models::{ApiResponse, ErrorCode, MoveRequest};
use crate::services::{current_school, internal_error, not_found};
use crate::storage::Storage;

async fn load_grade_level(
    storage: &Arc<dyn Storage>,
    school_id: i64,
    grade_level_id: i64,
) -> Result<GradeLevel, HttpResponse> {
    match storage.get_grade_level(school_id, grade_level_id).await {
        Ok(Some(grade_level)) => Ok(grade_level),
        Ok(None) => Err(not_found(ErrorCode::GradeLevelNotFound, "Grade level not found")),
        Err(e) => Err(internal_error("Failed to load grade level", e)),
    }
}

pub async fn list_courses(
    service: &GradeLevelService,
    request: &HttpRequest,
    grade_level_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let grade_level = match load_grade_level(&storage, school.id, grade_level_id).await {
        Ok(grade_level) => grade_level,
        Err(response) => return Ok(response),
    };

    match storage.list_grade_level_courses(grade_level.id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeLevelCoursesResponse {
                grade_level,
                courses,
            },
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list courses", e)),
    }
}

pub async fn move_course(
    service: &GradeLevelService,
    request: &HttpRequest,
    grade_level_id: i64,
    course_uuid: String,
    move_request: MoveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let grade_level = match load_grade_level(&storage, school.id, grade_level_id).await {
        Ok(grade_level) => grade_level,
        Err(response) => return Ok(response),
    };

    let course = match storage.get_course_by_uuid(school.id, &course_uuid).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(internal_error("Failed to load course", e)),
    };

    match storage
        .move_grade_level_course(grade_level.id, course.id, move_request.to)
        .await
    {
        Ok(Some(courses)) => {
            info!(
                "Course {} moved {:?} in grade level {}",
                course.uuid, move_request.to, grade_level.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GradeLevelCoursesResponse {
                    grade_level,
                    courses,
                },
                "Course moved successfully",
            )))
        }
        // 课程属于该学校，但不在这个年级中
        Ok(None) => Ok(not_found(
            ErrorCode::CourseNotFound,
            "Course not found in grade level",
        )),
        Err(e) => Ok(internal_error("Failed to move course", e)),
    }
}
