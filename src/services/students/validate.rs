//! 学生、入学与评分校验

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::FormErrors;
use crate::models::grade_levels::entities::GradeLevel;
use crate::models::school_years::entities::SchoolYear;
use crate::models::schools::entities::School;
use crate::models::students::entities::Student;
use crate::models::students::requests::CreateStudentRequest;
use crate::services::internal_error;
use crate::services::school_years::validate::REQUIRED;
use crate::storage::Storage;
use crate::utils::validate::{PERSON_NAME_MAX_LEN, validate_required_text, validate_score};

pub const INVALID_GRADE_LEVEL: &str = "Invalid grade level.";
pub const NOT_GRADED: &str = "This task is not graded.";

pub fn check_names(request: &CreateStudentRequest) -> Result<(String, String), FormErrors> {
    let mut errors = FormErrors::new();
    for (field, value) in [
        ("first_name", &request.first_name),
        ("last_name", &request.last_name),
    ] {
        if let Err(msg) = validate_required_text(value, PERSON_NAME_MAX_LEN) {
            errors.add_field(field, msg);
        }
    }
    errors.into_result()?;
    Ok((
        request.first_name.trim().to_string(),
        request.last_name.trim().to_string(),
    ))
}

pub fn wrong_school_year_message(school_year: &SchoolYear) -> String {
    format!("The grade level must be in the {school_year} school year.")
}

pub fn duplicate_enrollment_message(student: &Student, grade_level: &GradeLevel) -> String {
    format!(
        "A student may not be enrolled in multiple grade levels in a school year. \
         {student} is enrolled in {grade_level}."
    )
}

/// 年级必须属于当前学校，且属于路由中的学年
pub fn check_grade_level(
    grade_level: Option<&GradeLevel>,
    school_year: &SchoolYear,
) -> Result<(), FormErrors> {
    match grade_level {
        None => Err(FormErrors::single(INVALID_GRADE_LEVEL)),
        Some(grade_level) if grade_level.school_year_id != school_year.id => {
            Err(FormErrors::single(wrong_school_year_message(school_year)))
        }
        Some(_) => Ok(()),
    }
}

pub fn check_score(score: Option<i32>) -> Result<i32, FormErrors> {
    let mut errors = FormErrors::new();
    match score {
        None => errors.add_field("score", REQUIRED),
        Some(score) => {
            if let Err(msg) = validate_score(score) {
                errors.add_field("score", msg);
            }
        }
    }
    errors.into_result()?;
    Ok(score.unwrap_or_default())
}

/// 入学校验，通过时返回目标年级
pub async fn validate_enrollment(
    storage: &Arc<dyn Storage>,
    school: &School,
    student: &Student,
    school_year: &SchoolYear,
    grade_level_id: Option<i64>,
) -> Result<GradeLevel, HttpResponse> {
    let Some(grade_level_id) = grade_level_id else {
        let mut errors = FormErrors::new();
        errors.add_field("grade_level_id", REQUIRED);
        return Err(errors.to_response());
    };

    let grade_level = storage
        .get_grade_level(school.id, grade_level_id)
        .await
        .map_err(|e| internal_error("Failed to load grade level", e))?;

    check_grade_level(grade_level.as_ref(), school_year).map_err(|errors| errors.to_response())?;

    match storage
        .get_enrollment_in_school_year(student.id, school_year.id)
        .await
    {
        Ok(Some((_, enrolled_in))) => Err(FormErrors::single(duplicate_enrollment_message(
            student,
            &enrolled_in,
        ))
        .to_response()),
        Ok(None) => grade_level
            .ok_or_else(|| FormErrors::single(INVALID_GRADE_LEVEL).to_response()),
        Err(e) => Err(internal_error("Failed to check enrollment", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{fixtures, test_storage};
    use actix_web::http::StatusCode;

    #[test]
    fn test_check_names() {
        let request = CreateStudentRequest {
            first_name: " Mark ".to_string(),
            last_name: "Williams".to_string(),
        };
        assert_eq!(
            check_names(&request).unwrap(),
            ("Mark".to_string(), "Williams".to_string())
        );

        let request = CreateStudentRequest {
            first_name: "".to_string(),
            last_name: "".to_string(),
        };
        let errors = check_names(&request).unwrap_err();
        assert!(errors.has_field("first_name"));
        assert!(errors.has_field("last_name"));
    }

    #[test]
    fn test_check_score() {
        assert_eq!(check_score(Some(0)).unwrap(), 0);
        assert_eq!(check_score(Some(100)).unwrap(), 100);
        assert!(check_score(Some(101)).unwrap_err().has_field("score"));
        assert!(check_score(Some(-1)).unwrap_err().has_field("score"));
        assert_eq!(
            check_score(None).unwrap_err().field_errors["score"],
            vec![REQUIRED.to_string()]
        );
    }

    #[tokio::test]
    async fn test_single_enrollment_per_school_year() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "parent").await;
        let year = fixtures::school_year(
            &storage,
            school.id,
            fixtures::date(2024, 9, 1),
            fixtures::date(2025, 6, 1),
        )
        .await;
        let next_year = fixtures::school_year(
            &storage,
            school.id,
            fixtures::date(2025, 9, 1),
            fixtures::date(2026, 6, 1),
        )
        .await;
        let first = fixtures::grade_level(&storage, year.id, "1st Grade").await;
        let second = fixtures::grade_level(&storage, year.id, "2nd Grade").await;
        let later = fixtures::grade_level(&storage, next_year.id, "2nd Grade").await;
        let student = storage
            .create_student_impl(school.id, "Mark".to_string(), "Williams".to_string())
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let grade_level = validate_enrollment(&storage, &school, &student, &year, Some(first.id))
            .await
            .unwrap();
        storage
            .create_enrollment(student.id, grade_level.id)
            .await
            .unwrap();

        let response = validate_enrollment(&storage, &school, &student, &year, Some(second.id))
            .await
            .unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            duplicate_enrollment_message(&student, &first),
            "A student may not be enrolled in multiple grade levels in a school year. \
             Mark Williams is enrolled in 1st Grade."
        );

        // 年级必须属于路由中的学年
        assert!(
            validate_enrollment(&storage, &school, &student, &year, Some(later.id))
                .await
                .is_err()
        );
        assert!(
            validate_enrollment(&storage, &school, &student, &next_year, Some(later.id))
                .await
                .is_ok()
        );
    }
}
