//! 学年表单校验
//!
//! 规则顺序：学校归属（失败即停止）→ 必填日期 → 日期顺序 → 同校重叠 → 已有假期 → 上课星期。

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::FormErrors;
use crate::models::school_breaks::entities::SchoolBreak;
use crate::models::school_years::entities::{SchoolYear, SchoolYearInput};
use crate::models::school_years::requests::SchoolYearRequest;
use crate::models::schools::entities::School;
use crate::services::internal_error;
use crate::storage::Storage;
use crate::utils::{DateRange, DaysOfWeek};

pub const DIFFERENT_SCHOOL: &str = "A school year cannot be created for a different school.";
pub const START_BEFORE_END: &str = "The start date must be before the end date.";
pub const NO_WEEK_DAYS: &str = "A school year must run on at least one week day.";
pub const REQUIRED: &str = "This field is required.";
pub const INVALID_SCHOOL_YEAR: &str = "Invalid school year.";

/// 请求中指定的学校必须是当前管理员的学校，省略时视为当前学校
pub fn check_school(request: &SchoolYearRequest, school: &School) -> Result<(), FormErrors> {
    match request.school_id {
        Some(school_id) if school_id != school.id => Err(FormErrors::single(DIFFERENT_SCHOOL)),
        _ => Ok(()),
    }
}

/// 必填与顺序规则，通过时返回需要做重叠检查的范围
///
/// 学年的开始日期必须严格早于结束日期。
pub fn check_dates(request: &SchoolYearRequest, errors: &mut FormErrors) -> Option<DateRange> {
    if request.start_date.is_none() {
        errors.add_field("start_date", REQUIRED);
    }
    if request.end_date.is_none() {
        errors.add_field("end_date", REQUIRED);
    }

    let (start, end) = (request.start_date?, request.end_date?);
    if start >= end {
        errors.add_non_field(START_BEFORE_END);
        return None;
    }
    Some(DateRange::new(start, end))
}

pub fn check_week_days(days_of_week: DaysOfWeek, errors: &mut FormErrors) {
    if days_of_week.is_empty() {
        errors.add_non_field(NO_WEEK_DAYS);
    }
}

/// 假期、年级等下级记录写入前的学年归属校验
///
/// 学年不存在时报告 `Invalid school year.`，属于其他学校时报告 `foreign_message`。
pub fn check_owned_school_year(
    school_year: Option<&SchoolYear>,
    school: &School,
    foreign_message: &str,
) -> Result<(), FormErrors> {
    match school_year {
        None => Err(FormErrors::single(INVALID_SCHOOL_YEAR)),
        Some(school_year) if school_year.school_id != school.id => {
            Err(FormErrors::single(foreign_message))
        }
        Some(_) => Ok(()),
    }
}

/// 加载请求中引用的学年并校验归属
pub async fn load_owned_school_year(
    storage: &Arc<dyn Storage>,
    school: &School,
    school_year_id: Option<i64>,
    foreign_message: &str,
) -> Result<SchoolYear, HttpResponse> {
    let school_year = match school_year_id {
        Some(id) => storage
            .find_school_year_by_id(id)
            .await
            .map_err(|e| internal_error("Failed to load school year", e))?,
        None => None,
    };

    check_owned_school_year(school_year.as_ref(), school, foreign_message)
        .map_err(|errors| errors.to_response())?;

    school_year.ok_or_else(|| FormErrors::single(INVALID_SCHOOL_YEAR).to_response())
}

pub fn overlap_message(existing: &SchoolYear) -> String {
    format!(
        "School years may not have overlapping dates. \
         The dates provided overlap with the {existing} school year."
    )
}

/// 编辑后的学年必须仍然包含已有的假期，只报告第一个越界的假期
pub fn check_breaks_contained(
    range: &DateRange,
    breaks: &[SchoolBreak],
    errors: &mut FormErrors,
) {
    let outside = breaks
        .iter()
        .find(|b| !(range.contains(b.start_date) && range.contains(b.end_date)));
    if let Some(outside) = outside {
        errors.add_non_field(format!(
            "A school year must contain its breaks. \
             The break from {} to {} is outside the dates provided.",
            outside.start_date, outside.end_date
        ));
    }
}

/// 执行全部规则，编辑时通过 `exclude_id` 排除学年自身
pub async fn validate_school_year(
    storage: &Arc<dyn Storage>,
    school: &School,
    request: &SchoolYearRequest,
    exclude_id: Option<i64>,
) -> Result<SchoolYearInput, HttpResponse> {
    check_school(request, school).map_err(|errors| errors.to_response())?;

    let mut errors = FormErrors::new();
    let range = check_dates(request, &mut errors);

    if let Some(range) = range {
        match storage
            .find_overlapping_school_year(school.id, range, exclude_id)
            .await
        {
            Ok(Some(existing)) => errors.add_non_field(overlap_message(&existing)),
            Ok(None) => {}
            Err(e) => return Err(internal_error("Failed to check school year overlap", e)),
        }

        if let Some(school_year_id) = exclude_id {
            let breaks = storage
                .list_school_breaks(school.id, Some(school_year_id))
                .await
                .map_err(|e| internal_error("Failed to load school breaks", e))?;
            check_breaks_contained(&range, &breaks, &mut errors);
        }
    }

    check_week_days(request.days_of_week, &mut errors);

    match (errors.into_result(), range) {
        (Ok(()), Some(range)) => Ok(SchoolYearInput {
            start_date: range.start,
            end_date: range.end,
            days_of_week: request.days_of_week,
        }),
        (Err(errors), _) => Err(errors.to_response()),
        // 没有错误时日期一定齐全
        (Ok(()), None) => Err(FormErrors::single(START_BEFORE_END).to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{fixtures, test_storage};
    use actix_web::http::StatusCode;
    use chrono::NaiveDate;

    fn request(start: Option<NaiveDate>, end: Option<NaiveDate>) -> SchoolYearRequest {
        SchoolYearRequest {
            school_id: None,
            start_date: start,
            end_date: end,
            days_of_week: DaysOfWeek::WEEKDAYS,
        }
    }

    fn school(id: i64) -> School {
        School {
            id,
            admin_id: id,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_check_school() {
        let mut req = request(None, None);
        assert!(check_school(&req, &school(1)).is_ok());
        req.school_id = Some(1);
        assert!(check_school(&req, &school(1)).is_ok());
        req.school_id = Some(2);
        let errors = check_school(&req, &school(1)).unwrap_err();
        assert_eq!(errors.non_field_errors, vec![DIFFERENT_SCHOOL.to_string()]);
    }

    #[test]
    fn test_check_dates() {
        let start = fixtures::date(2024, 9, 1);
        let end = fixtures::date(2025, 6, 1);

        let mut errors = FormErrors::new();
        assert_eq!(
            check_dates(&request(Some(start), Some(end)), &mut errors),
            Some(DateRange::new(start, end))
        );
        assert!(errors.is_empty());

        // 同一天也不允许
        let mut errors = FormErrors::new();
        assert_eq!(check_dates(&request(Some(start), Some(start)), &mut errors), None);
        assert_eq!(errors.non_field_errors, vec![START_BEFORE_END.to_string()]);

        let mut errors = FormErrors::new();
        assert_eq!(check_dates(&request(None, Some(end)), &mut errors), None);
        assert!(errors.has_field("start_date"));
        assert!(!errors.has_field("end_date"));
    }

    #[test]
    fn test_check_week_days() {
        let mut errors = FormErrors::new();
        check_week_days(DaysOfWeek::NO_DAYS, &mut errors);
        assert_eq!(errors.non_field_errors, vec![NO_WEEK_DAYS.to_string()]);

        let mut errors = FormErrors::new();
        check_week_days(DaysOfWeek::SATURDAY, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_owned_school_year() {
        let now = chrono::Utc::now();
        let year = SchoolYear {
            id: 1,
            uuid: uuid::Uuid::new_v4(),
            school_id: 1,
            start_date: fixtures::date(2024, 9, 1),
            end_date: fixtures::date(2025, 6, 1),
            days_of_week: DaysOfWeek::WEEKDAYS,
            created_at: now,
            updated_at: now,
        };

        assert!(check_owned_school_year(Some(&year), &school(1), "foreign").is_ok());

        let errors = check_owned_school_year(Some(&year), &school(2), "foreign").unwrap_err();
        assert_eq!(errors.non_field_errors, vec!["foreign".to_string()]);

        let errors = check_owned_school_year(None, &school(1), "foreign").unwrap_err();
        assert_eq!(errors.non_field_errors, vec![INVALID_SCHOOL_YEAR.to_string()]);
    }

    #[tokio::test]
    async fn test_shrinking_year_must_keep_its_breaks() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "parent").await;
        let year = fixtures::school_year(
            &storage,
            school.id,
            fixtures::date(2024, 9, 1),
            fixtures::date(2025, 6, 1),
        )
        .await;
        fixtures::school_break(
            &storage,
            year.id,
            fixtures::date(2024, 12, 23),
            fixtures::date(2025, 1, 3),
        )
        .await;
        fixtures::school_break(
            &storage,
            year.id,
            fixtures::date(2025, 5, 26),
            fixtures::date(2025, 5, 30),
        )
        .await;

        let breaks = storage
            .list_school_breaks_impl(school.id, Some(year.id))
            .await
            .unwrap();
        let mut errors = FormErrors::new();
        let shorter = DateRange::new(fixtures::date(2024, 9, 1), fixtures::date(2025, 5, 1));
        check_breaks_contained(&shorter, &breaks, &mut errors);
        assert_eq!(
            errors.non_field_errors,
            vec![
                "A school year must contain its breaks. \
                 The break from 2025-05-26 to 2025-05-30 is outside the dates provided."
                    .to_string()
            ]
        );

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let response = validate_school_year(
            &storage,
            &school,
            &request(Some(fixtures::date(2024, 9, 1)), Some(fixtures::date(2025, 5, 1))),
            Some(year.id),
        )
        .await
        .unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // 假期仍在范围内时可以缩短
        assert!(
            validate_school_year(
                &storage,
                &school,
                &request(Some(fixtures::date(2024, 8, 15)), Some(fixtures::date(2025, 5, 30))),
                Some(year.id),
            )
            .await
            .is_ok()
        );
    }

    #[tokio::test]
    async fn test_validate_rejects_overlap_but_not_self() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "parent").await;
        let existing = fixtures::school_year(
            &storage,
            school.id,
            fixtures::date(2024, 9, 1),
            fixtures::date(2025, 6, 1),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let overlapping = request(
            Some(fixtures::date(2025, 5, 1)),
            Some(fixtures::date(2026, 5, 1)),
        );
        let response = validate_school_year(&storage, &school, &overlapping, None)
            .await
            .unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            overlap_message(&existing),
            "School years may not have overlapping dates. \
             The dates provided overlap with the 2024–2025 school year."
        );

        // 编辑自身不算重叠
        let input = validate_school_year(&storage, &school, &overlapping, Some(existing.id))
            .await
            .unwrap();
        assert_eq!(input.start_date, fixtures::date(2025, 5, 1));

        let next_year = request(
            Some(fixtures::date(2025, 8, 1)),
            Some(fixtures::date(2026, 5, 1)),
        );
        assert!(
            validate_school_year(&storage, &school, &next_year, None)
                .await
                .is_ok()
        );
    }
}
