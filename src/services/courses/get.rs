use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::courses::requests::TaskCountQuery;
use crate::models::courses::responses::{CourseDetailResponse, TaskCountResponse};
use crate::services::{check_range_limit, current_school, internal_error};
use crate::utils::DateRange;

pub async fn get_course(
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

    let grade_levels = match storage.get_course_grade_levels(course.id).await {
        Ok(grade_levels) => grade_levels,
        Err(e) => return Ok(internal_error("Failed to load grade levels", e)),
    };

    let task_count = match storage.count_course_tasks(course.id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("Failed to count course tasks", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetailResponse {
            is_running: course.is_running(),
            course,
            grade_levels,
            task_count,
        },
        "Course retrieved successfully",
    )))
}

/// 日期范围内的上课天数；结束早于开始时只看开始当天
pub async fn count_tasks(
    service: &CourseService,
    request: &HttpRequest,
    course_uuid: String,
    query: TaskCountQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let range = DateRange::new(query.start_date, query.end_date);
    if let Err(errors) = check_range_limit(&range, AppConfig::get().schedule.max_range_days) {
        return Ok(errors.to_response());
    }

    let course = match load_course(&storage, &school, &course_uuid).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TaskCountResponse {
            course_uuid: course.uuid,
            start_date: range.start,
            end_date: range.end,
            task_count: course.task_count_in_range(range.start, range.end),
        },
        "Task count calculated successfully",
    )))
}
