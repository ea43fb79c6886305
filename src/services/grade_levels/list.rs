use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeLevelService;
use crate::models::ApiResponse;
use crate::models::grade_levels::requests::GradeLevelListQuery;
use crate::models::grade_levels::responses::GradeLevelListResponse;
use crate::services::{current_school, internal_error};

pub async fn list_grade_levels(
    service: &GradeLevelService,
    request: &HttpRequest,
    query: GradeLevelListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage
        .list_grade_levels(school.id, query.school_year_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeLevelListResponse { items },
            "Grade levels retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list grade levels", e)),
    }
}
