use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolService;
use crate::models::ApiResponse;
use crate::models::schools::responses::SchoolResponse;
use crate::services::{current_school, internal_error};

pub async fn get_school(service: &SchoolService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    match storage.list_school_years(school.id).await {
        Ok(school_years) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SchoolResponse {
                school,
                school_years,
            },
            "School retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list school years", e)),
    }
}
