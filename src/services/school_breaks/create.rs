use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolBreakService, validate::validate_school_break};
use crate::models::ApiResponse;
use crate::models::school_breaks::requests::SchoolBreakRequest;
use crate::services::{current_school, internal_error};

pub async fn create_school_break(
    service: &SchoolBreakService,
    request: &HttpRequest,
    school_break_data: SchoolBreakRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let (school_year, input) =
        match validate_school_break(&storage, &school, &school_break_data, None).await {
            Ok(validated) => validated,
            Err(response) => return Ok(response),
        };

    match storage.create_school_break(school_year.id, input).await {
        Ok(school_break) => {
            info!(
                "School break {} created in school year {}",
                school_break.uuid, school_year.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                school_break,
                "School break created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create school break", e)),
    }
}
