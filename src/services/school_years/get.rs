use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolYearService;
use super::validate::START_BEFORE_END;
use crate::config::AppConfig;
use crate::models::school_years::requests::SchoolDaysQuery;
use crate::models::school_years::responses::SchoolDaysResponse;
use crate::models::{ApiResponse, ErrorCode, FormErrors};
use crate::services::{check_range_limit, current_school, internal_error, not_found};
use crate::utils::DateRange;

pub async fn get_school_year(
    service: &SchoolYearService,
    request: &HttpRequest,
    school_year_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage
        .get_school_year_detail(school.id, school_year_id)
        .await
    {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "School year retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SchoolYearNotFound, "School year not found")),
        Err(e) => Ok(internal_error("Failed to load school year", e)),
    }
}

pub async fn count_school_days(
    service: &SchoolYearService,
    request: &HttpRequest,
    school_year_id: i64,
    query: SchoolDaysQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let range = DateRange::new(query.start_date, query.end_date);
    if !range.is_ordered() {
        return Ok(FormErrors::single(START_BEFORE_END).to_response());
    }
    if let Err(errors) = check_range_limit(&range, AppConfig::get().schedule.max_range_days) {
        return Ok(errors.to_response());
    }

    match storage
        .get_school_year_detail(school.id, school_year_id)
        .await
    {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SchoolDaysResponse {
                school_year_id,
                start_date: range.start,
                end_date: range.end,
                school_days: detail.school_days_in_range(&range),
            },
            "School days counted successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SchoolYearNotFound, "School year not found")),
        Err(e) => Ok(internal_error("Failed to load school year", e)),
    }
}
