//! 课程表单校验

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::FormErrors;
use crate::models::courses::entities::CourseInput;
use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use crate::models::grade_levels::entities::GradeLevel;
use crate::models::schools::entities::School;
use crate::services::internal_error;
use crate::storage::Storage;
use crate::utils::DaysOfWeek;
use crate::utils::validate::{COURSE_NAME_MAX_LEN, validate_duration, validate_required_text};

pub const DIFFERENT_USER: &str =
    "A course cannot be associated with a different user's grade level.";
pub const NO_GRADE_LEVELS: &str = "A course must be in at least one grade level.";

/// 名称、星期与默认时长；时长省略时取 `fallback_duration`
pub fn check_fields(
    name: &str,
    days_of_week: DaysOfWeek,
    default_task_duration: Option<i32>,
    fallback_duration: i32,
) -> Result<CourseInput, FormErrors> {
    let mut errors = FormErrors::new();

    if let Err(msg) = validate_required_text(name, COURSE_NAME_MAX_LEN) {
        errors.add_field("name", msg);
    }

    let duration = default_task_duration.unwrap_or(fallback_duration);
    if let Err(msg) = validate_duration(duration) {
        errors.add_field("default_task_duration", msg);
    }

    errors.into_result()?;
    Ok(CourseInput {
        name: name.trim().to_string(),
        days_of_week,
        default_task_duration: duration,
    })
}

/// 去重后的年级 id 必须全部出现在 `owned` 中
pub fn check_grade_levels(requested: &[i64], owned: &[GradeLevel]) -> Result<Vec<i64>, FormErrors> {
    let mut ids = requested.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Err(FormErrors::single(NO_GRADE_LEVELS));
    }
    if ids.iter().any(|id| !owned.iter().any(|gl| gl.id == *id)) {
        return Err(FormErrors::single(DIFFERENT_USER));
    }
    Ok(ids)
}

pub async fn validate_create_course(
    storage: &Arc<dyn Storage>,
    school: &School,
    request: &CreateCourseRequest,
    fallback_duration: i32,
) -> Result<(CourseInput, Vec<i64>), HttpResponse> {
    let mut errors = FormErrors::new();

    let input = match check_fields(
        &request.name,
        request.days_of_week,
        request.default_task_duration,
        fallback_duration,
    ) {
        Ok(input) => Some(input),
        Err(field_errors) => {
            errors = field_errors;
            None
        }
    };

    let owned = storage
        .get_grade_levels_by_ids(school.id, &request.grade_level_ids)
        .await
        .map_err(|e| internal_error("Failed to load grade levels", e))?;

    let grade_level_ids = match check_grade_levels(&request.grade_level_ids, &owned) {
        Ok(ids) => Some(ids),
        Err(grade_level_errors) => {
            errors
                .non_field_errors
                .extend(grade_level_errors.non_field_errors);
            None
        }
    };

    match (input, grade_level_ids) {
        (Some(input), Some(ids)) => Ok((input, ids)),
        _ => Err(errors.to_response()),
    }
}

/// 更新不改变课程所属的年级
pub fn validate_update_course(
    request: &UpdateCourseRequest,
    current_duration: i32,
) -> Result<CourseInput, HttpResponse> {
    check_fields(
        &request.name,
        request.days_of_week,
        request.default_task_duration,
        current_duration,
    )
    .map_err(|errors| errors.to_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{fixtures, test_storage};
    use actix_web::http::StatusCode;

    fn grade_level(id: i64) -> GradeLevel {
        let now = chrono::Utc::now();
        GradeLevel {
            id,
            uuid: uuid::Uuid::new_v4(),
            school_year_id: 1,
            name: format!("Grade {id}"),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_check_fields() {
        let input = check_fields(" Math ", DaysOfWeek::WEEKDAYS, None, 30).unwrap();
        assert_eq!(input.name, "Math");
        assert_eq!(input.default_task_duration, 30);

        let input = check_fields("Math", DaysOfWeek::NO_DAYS, Some(0), 30).unwrap();
        assert_eq!(input.default_task_duration, 0);

        let errors = check_fields("", DaysOfWeek::WEEKDAYS, Some(-5), 30).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("default_task_duration"));
    }

    #[test]
    fn test_check_grade_levels() {
        let owned = vec![grade_level(1), grade_level(2)];
        assert_eq!(check_grade_levels(&[2, 1, 2], &owned).unwrap(), vec![1, 2]);

        let errors = check_grade_levels(&[], &owned).unwrap_err();
        assert_eq!(errors.non_field_errors, vec![NO_GRADE_LEVELS.to_string()]);

        let errors = check_grade_levels(&[1, 3], &owned).unwrap_err();
        assert_eq!(errors.non_field_errors, vec![DIFFERENT_USER.to_string()]);
    }

    #[tokio::test]
    async fn test_rejects_other_school_grade_level() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "parent").await;
        let other_school = fixtures::school(&storage, "neighbor").await;
        let year = fixtures::school_year(
            &storage,
            school.id,
            fixtures::date(2024, 9, 1),
            fixtures::date(2025, 6, 1),
        )
        .await;
        let other_year = fixtures::school_year(
            &storage,
            other_school.id,
            fixtures::date(2024, 9, 1),
            fixtures::date(2025, 6, 1),
        )
        .await;
        let first = fixtures::grade_level(&storage, year.id, "1st Grade").await;
        let foreign = fixtures::grade_level(&storage, other_year.id, "1st Grade").await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let mut request = CreateCourseRequest {
            name: "Reading".to_string(),
            days_of_week: DaysOfWeek::WEEKDAYS,
            default_task_duration: None,
            grade_level_ids: vec![first.id],
        };
        let (input, ids) = validate_create_course(&storage, &school, &request, 45)
            .await
            .unwrap();
        assert_eq!(input.default_task_duration, 45);
        assert_eq!(ids, vec![first.id]);

        request.grade_level_ids.push(foreign.id);
        let response = validate_create_course(&storage, &school, &request, 45)
            .await
            .unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
