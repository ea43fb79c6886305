use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolBreakService, validate::validate_school_break};
use crate::models::school_breaks::requests::SchoolBreakRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn update_school_break(
    service: &SchoolBreakService,
    request: &HttpRequest,
    school_break_id: i64,
    mut update_data: SchoolBreakRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let existing = match storage.get_school_break(school.id, school_break_id).await {
        Ok(Some(school_break)) => school_break,
        Ok(None) => {
            return Ok(not_found(ErrorCode::SchoolBreakNotFound, "School break not found"));
        }
        Err(e) => return Ok(internal_error("Failed to load school break", e)),
    };

    // 未指定学年时保留原学年
    update_data
        .school_year_id
        .get_or_insert(existing.school_year_id);

    let (school_year, input) =
        match validate_school_break(&storage, &school, &update_data, Some(existing.id)).await {
            Ok(validated) => validated,
            Err(response) => return Ok(response),
        };

    match storage
        .update_school_break(existing.id, school_year.id, input)
        .await
    {
        Ok(Some(school_break)) => {
            info!("School break {} updated", school_break.uuid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                school_break,
                "School break updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SchoolBreakNotFound, "School break not found")),
        Err(e) => Ok(internal_error("Failed to update school break", e)),
    }
}
