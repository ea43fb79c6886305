use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolYearService, validate::validate_school_year};
use crate::models::school_years::requests::SchoolYearRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn update_school_year(
    service: &SchoolYearService,
    request: &HttpRequest,
    school_year_id: i64,
    update_data: SchoolYearRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.get_school_year(school.id, school_year_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SchoolYearNotFound, "School year not found")),
        Err(e) => return Ok(internal_error("Failed to load school year", e)),
    }

    let input =
        match validate_school_year(&storage, &school, &update_data, Some(school_year_id)).await {
            Ok(input) => input,
            Err(response) => return Ok(response),
        };

    match storage.update_school_year(school_year_id, input).await {
        Ok(Some(school_year)) => {
            info!("School year {} updated", school_year.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                school_year,
                "School year updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SchoolYearNotFound, "School year not found")),
        Err(e) => Ok(internal_error("Failed to update school year", e)),
    }
}
