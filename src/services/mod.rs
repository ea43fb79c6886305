pub mod auth;
pub mod course_resources;
pub mod course_tasks;
pub mod courses;
pub mod grade_levels;
pub mod school_breaks;
pub mod school_years;
pub mod schools;
pub mod students;

use std::fmt::Display;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::schools::entities::School;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode, FormErrors};
use crate::storage::Storage;
use crate::utils::DateRange;

pub use auth::AuthService;
pub use course_resources::CourseResourceService;
pub use course_tasks::CourseTaskService;
pub use courses::CourseService;
pub use grade_levels::GradeLevelService;
pub use school_breaks::SchoolBreakService;
pub use school_years::SchoolYearService;
pub use schools::SchoolService;
pub use students::StudentService;

/// 从 app data 中取出存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage unavailable")
        })
}

/// 存储层失败：记录日志并返回 500
pub(crate) fn internal_error(context: &str, err: impl Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        context,
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

/// 当前登录的管理员及其学校
pub(crate) async fn current_school(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<(User, School), HttpResponse> {
    let user = RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })?;

    match storage.get_school_by_admin(user.id).await {
        Ok(Some(school)) => Ok((user, school)),
        Ok(None) => Err(not_found(ErrorCode::SchoolNotFound, "School not found")),
        Err(e) => Err(internal_error("Failed to load school", e)),
    }
}

/// 日期范围查询的天数上限
pub(crate) fn check_range_limit(range: &DateRange, max_days: i64) -> Result<(), FormErrors> {
    if range.len_days() > max_days {
        return Err(FormErrors::single(format!(
            "The date range may not be longer than {max_days} days."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_check_range_limit() {
        let week = DateRange::new(d(2024, 9, 1), d(2024, 9, 7));
        assert!(check_range_limit(&week, 7).is_ok());
        assert!(check_range_limit(&week, 6).is_err());
        // 逆序范围按单日处理，不受上限影响
        let reversed = DateRange::new(d(2030, 1, 1), d(2020, 1, 1));
        assert!(check_range_limit(&reversed, 1).is_ok());
    }
}
