use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolYearService, validate::validate_school_year};
use crate::models::ApiResponse;
use crate::models::school_years::requests::SchoolYearRequest;
use crate::services::{current_school, internal_error};

pub async fn create_school_year(
    service: &SchoolYearService,
    request: &HttpRequest,
    school_year_data: SchoolYearRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (user, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let input = match validate_school_year(&storage, &school, &school_year_data, None).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.create_school_year(school.id, input).await {
        Ok(school_year) => {
            info!(
                "School year {} created by user {}",
                school_year.uuid, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                school_year,
                "School year created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create school year", e)),
    }
}
