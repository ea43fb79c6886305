use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::validate::{NOT_GRADED, check_score};
use super::{StudentService, load_student};
use crate::models::students::requests::GradeRequest;
use crate::models::{ApiResponse, FormErrors};
use crate::services::course_tasks::load_task;
use crate::services::{current_school, internal_error};

pub async fn grade(
    service: &StudentService,
    request: &HttpRequest,
    grade_data: GradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let score = match check_score(grade_data.score) {
        Ok(score) => score,
        Err(errors) => return Ok(errors.to_response()),
    };

    let student = match load_student(&storage, &school, &grade_data.student_uuid).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let task = match load_task(&storage, &school, &grade_data.task_uuid).await {
        Ok(task) => task,
        Err(response) => return Ok(response),
    };

    if !task.is_graded {
        return Ok(FormErrors::single(NOT_GRADED).to_response());
    }

    match storage.grade_task(student.id, task.id, score).await {
        Ok(Some(grade)) => {
            info!(
                "Student {} scored {} on task {}",
                student.uuid, grade.score, task.uuid
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade saved successfully")))
        }
        // 任务在两次查询之间改为不计分
        Ok(None) => Ok(FormErrors::single(NOT_GRADED).to_response()),
        Err(e) => Ok(internal_error("Failed to save grade", e)),
    }
}
