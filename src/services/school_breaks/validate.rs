//! 假期表单校验
//!
//! 学年归属失败即停止；日期顺序正确时才检查是否落在学年内以及与其他假期重叠，
//! 两端越界会各自产生一条错误。

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::FormErrors;
use crate::models::school_breaks::entities::{SchoolBreak, SchoolBreakInput};
use crate::models::school_breaks::requests::SchoolBreakRequest;
use crate::models::school_years::entities::SchoolYear;
use crate::models::schools::entities::School;
use crate::services::internal_error;
use crate::services::school_years::validate::{
    REQUIRED, START_BEFORE_END, load_owned_school_year,
};
use crate::storage::Storage;
use crate::utils::DateRange;
use crate::utils::validate::validate_required_text;

pub const DIFFERENT_USER: &str =
    "A school break cannot be created for a different user's school year.";
pub const DESCRIPTION_MAX_LEN: usize = 256;

/// 必填字段与日期顺序，假期允许只有一天
pub fn check_fields(request: &SchoolBreakRequest, errors: &mut FormErrors) -> Option<DateRange> {
    if let Err(msg) = validate_required_text(&request.description, DESCRIPTION_MAX_LEN) {
        errors.add_field("description", msg);
    }
    if request.start_date.is_none() {
        errors.add_field("start_date", REQUIRED);
    }
    if request.end_date.is_none() {
        errors.add_field("end_date", REQUIRED);
    }

    let range = DateRange::new(request.start_date?, request.end_date?);
    if !range.is_ordered() {
        errors.add_non_field(START_BEFORE_END);
        return None;
    }
    Some(range)
}

/// 假期必须落在学年之内，首尾分别检查
pub fn check_in_school_year(school_year: &SchoolYear, range: &DateRange, errors: &mut FormErrors) {
    if range.start < school_year.start_date {
        errors.add_non_field(format!(
            "A break must be in the school year. \
             {} is before the school year's start of {}.",
            range.start, school_year.start_date
        ));
    }

    if range.end > school_year.end_date {
        errors.add_non_field(format!(
            "A break must be in the school year. \
             {} is after the school year's end of {}.",
            range.end, school_year.end_date
        ));
    }
}

pub fn overlap_message(existing: &SchoolBreak) -> String {
    format!(
        "School breaks may not have overlapping dates. \
         The dates provided overlap with the school break from {} to {}.",
        existing.start_date, existing.end_date
    )
}

/// 执行全部规则，返回校验后的学年与字段
pub async fn validate_school_break(
    storage: &Arc<dyn Storage>,
    school: &School,
    request: &SchoolBreakRequest,
    exclude_id: Option<i64>,
) -> Result<(SchoolYear, SchoolBreakInput), HttpResponse> {
    let school_year =
        load_owned_school_year(storage, school, request.school_year_id, DIFFERENT_USER).await?;

    let mut errors = FormErrors::new();
    let range = check_fields(request, &mut errors);

    if let Some(range) = range {
        check_in_school_year(&school_year, &range, &mut errors);

        match storage
            .find_overlapping_school_break(school_year.id, range, exclude_id)
            .await
        {
            Ok(Some(existing)) => errors.add_non_field(overlap_message(&existing)),
            Ok(None) => {}
            Err(e) => return Err(internal_error("Failed to check school break overlap", e)),
        }
    }

    errors.into_result().map_err(|errors| errors.to_response())?;

    let range = range.ok_or_else(|| FormErrors::single(START_BEFORE_END).to_response())?;
    Ok((
        school_year,
        SchoolBreakInput {
            description: request.description.trim().to_string(),
            start_date: range.start,
            end_date: range.end,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{fixtures, test_storage};
    use actix_web::http::StatusCode;
    use chrono::NaiveDate;

    fn request(school_year_id: i64, start: NaiveDate, end: NaiveDate) -> SchoolBreakRequest {
        SchoolBreakRequest {
            school_year_id: Some(school_year_id),
            description: "Winter break".to_string(),
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    fn year() -> SchoolYear {
        let now = chrono::Utc::now();
        SchoolYear {
            id: 1,
            uuid: uuid::Uuid::new_v4(),
            school_id: 1,
            start_date: fixtures::date(2024, 9, 1),
            end_date: fixtures::date(2025, 6, 1),
            days_of_week: crate::utils::DaysOfWeek::WEEKDAYS,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_check_fields() {
        let mut errors = FormErrors::new();
        let single_day = request(1, fixtures::date(2024, 11, 28), fixtures::date(2024, 11, 28));
        assert!(check_fields(&single_day, &mut errors).is_some());
        assert!(errors.is_empty());

        let mut errors = FormErrors::new();
        let reversed = request(1, fixtures::date(2024, 11, 29), fixtures::date(2024, 11, 28));
        assert!(check_fields(&reversed, &mut errors).is_none());
        assert_eq!(errors.non_field_errors, vec![START_BEFORE_END.to_string()]);

        let mut errors = FormErrors::new();
        let mut blank = request(1, fixtures::date(2024, 11, 28), fixtures::date(2024, 11, 29));
        blank.description = "  ".to_string();
        blank.end_date = None;
        assert!(check_fields(&blank, &mut errors).is_none());
        assert!(errors.has_field("description"));
        assert!(errors.has_field("end_date"));
    }

    #[test]
    fn test_break_must_be_in_school_year() {
        let year = year();

        let mut errors = FormErrors::new();
        let inside = DateRange::new(fixtures::date(2024, 11, 1), fixtures::date(2024, 11, 7));
        check_in_school_year(&year, &inside, &mut errors);
        assert!(errors.is_empty());

        let mut errors = FormErrors::new();
        let before = DateRange::new(fixtures::date(2024, 8, 1), fixtures::date(2024, 8, 7));
        check_in_school_year(&year, &before, &mut errors);
        assert_eq!(
            errors.non_field_errors,
            vec![
                "A break must be in the school year. \
                 2024-08-01 is before the school year's start of 2024-09-01."
                    .to_string()
            ]
        );

        // 两端同时越界时产生两条错误
        let mut errors = FormErrors::new();
        let around = DateRange::new(fixtures::date(2024, 8, 1), fixtures::date(2025, 7, 1));
        check_in_school_year(&year, &around, &mut errors);
        assert_eq!(errors.non_field_errors.len(), 2);
        assert!(errors.non_field_errors[1].contains("2025-07-01 is after the school year's end of 2025-06-01"));
    }

    #[tokio::test]
    async fn test_validate_school_break() {
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
        let existing = storage
            .create_school_break_impl(
                year.id,
                SchoolBreakInput {
                    description: "Christmas".to_string(),
                    start_date: fixtures::date(2024, 12, 20),
                    end_date: fixtures::date(2024, 12, 31),
                },
            )
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let accepted = request(year.id, fixtures::date(2024, 11, 1), fixtures::date(2024, 11, 7));
        let (school_year, input) = validate_school_break(&storage, &school, &accepted, None)
            .await
            .unwrap();
        assert_eq!(school_year.id, year.id);
        assert_eq!(input.description, "Winter break");

        let overlapping =
            request(year.id, fixtures::date(2024, 12, 25), fixtures::date(2025, 1, 2));
        let response = validate_school_break(&storage, &school, &overlapping, None)
            .await
            .unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            overlap_message(&existing),
            "School breaks may not have overlapping dates. \
             The dates provided overlap with the school break from 2024-12-20 to 2024-12-31."
        );

        // 编辑自身不算重叠
        assert!(
            validate_school_break(&storage, &school, &overlapping, Some(existing.id))
                .await
                .is_ok()
        );

        // 其他学校的管理员不能在该学年下创建假期
        assert!(
            validate_school_break(&storage, &other_school, &accepted, None)
                .await
                .is_err()
        );

        let mut missing_year = accepted.clone();
        missing_year.school_year_id = Some(9999);
        assert!(
            validate_school_break(&storage, &school, &missing_year, None)
                .await
                .is_err()
        );
    }
}
