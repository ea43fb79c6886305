use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, validate::check_names};
use crate::models::ApiResponse;
use crate::models::students::requests::CreateStudentRequest;
use crate::services::{current_school, internal_error};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let (first_name, last_name) = match check_names(&student_data) {
        Ok(names) => names,
        Err(errors) => return Ok(errors.to_response()),
    };

    match storage
        .create_student(school.id, first_name, last_name)
        .await
    {
        Ok(student) => {
            info!("Student {} created in school {}", student.uuid, school.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create student", e)),
    }
}
