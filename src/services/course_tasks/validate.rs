use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::FormErrors;
use crate::models::course_tasks::entities::CourseTaskInput;
use crate::models::course_tasks::requests::CourseTaskRequest;
use crate::models::grade_levels::entities::GradeLevel;
use crate::services::internal_error;
use crate::services::school_years::validate::REQUIRED;
use crate::storage::Storage;
use crate::utils::validate::validate_duration;

pub const FOREIGN_GRADE_LEVEL: &str = "The grade level must be one of the course's grade levels.";

/// 时长省略时取 `fallback_duration`，年级只能是课程所属年级之一
pub fn check_task(
    request: &CourseTaskRequest,
    fallback_duration: i32,
    course_grade_levels: &[GradeLevel],
) -> Result<CourseTaskInput, FormErrors> {
    let mut errors = FormErrors::new();

    let description = request.description.trim();
    if description.is_empty() {
        errors.add_field("description", REQUIRED);
    }

    let duration = request.duration.unwrap_or(fallback_duration);
    if let Err(msg) = validate_duration(duration) {
        errors.add_field("duration", msg);
    }

    if let Some(grade_level_id) = request.grade_level_id
        && !course_grade_levels.iter().any(|gl| gl.id == grade_level_id)
    {
        errors.add_field("grade_level_id", FOREIGN_GRADE_LEVEL);
    }

    errors.into_result()?;
    Ok(CourseTaskInput {
        description: description.to_string(),
        duration,
        grade_level_id: request.grade_level_id,
        is_graded: request.is_graded,
    })
}

pub async fn validate_course_task(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    request: &CourseTaskRequest,
    fallback_duration: i32,
) -> Result<CourseTaskInput, HttpResponse> {
    let course_grade_levels = match request.grade_level_id {
        Some(_) => storage
            .get_course_grade_levels(course_id)
            .await
            .map_err(|e| internal_error("Failed to load grade levels", e))?,
        None => Vec::new(),
    };

    check_task(request, fallback_duration, &course_grade_levels)
        .map_err(|errors| errors.to_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(description: &str) -> CourseTaskRequest {
        CourseTaskRequest {
            description: description.to_string(),
            duration: None,
            grade_level_id: None,
            is_graded: false,
        }
    }

    fn grade_level(id: i64) -> GradeLevel {
        let now = chrono::Utc::now();
        GradeLevel {
            id,
            uuid: uuid::Uuid::new_v4(),
            school_year_id: 1,
            name: "2nd Grade".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_duration_falls_back_to_course_default() {
        let input = check_task(&request(" Read chapter 1 "), 25, &[]).unwrap();
        assert_eq!(input.description, "Read chapter 1");
        assert_eq!(input.duration, 25);

        let mut req = request("Worksheet");
        req.duration = Some(-1);
        assert!(check_task(&req, 25, &[]).unwrap_err().has_field("duration"));
    }

    #[test]
    fn test_description_required() {
        let errors = check_task(&request("   "), 25, &[]).unwrap_err();
        assert_eq!(errors.field_errors["description"], vec![REQUIRED.to_string()]);
    }

    #[test]
    fn test_grade_level_must_belong_to_course() {
        let mut req = request("Spelling test");
        req.grade_level_id = Some(7);
        req.is_graded = true;

        let input = check_task(&req, 30, &[grade_level(7)]).unwrap();
        assert_eq!(input.grade_level_id, Some(7));
        assert!(input.is_graded);

        let errors = check_task(&req, 30, &[grade_level(8)]).unwrap_err();
        assert!(errors.has_field("grade_level_id"));
    }
}
