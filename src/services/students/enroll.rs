use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, load_student, validate::validate_enrollment};
use crate::models::students::requests::EnrollRequest;
use crate::models::students::responses::EnrollmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school, internal_error, not_found};

pub async fn enroll(
    service: &StudentService,
    request: &HttpRequest,
    student_uuid: String,
    school_year_uuid: String,
    enroll_data: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (_, school) = match current_school(&storage, request).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let student = match load_student(&storage, &school, &student_uuid).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let school_year = match storage
        .get_school_year_by_uuid(school.id, &school_year_uuid)
        .await
    {
        Ok(Some(school_year)) => school_year,
        Ok(None) => return Ok(not_found(ErrorCode::SchoolYearNotFound, "School year not found")),
        Err(e) => return Ok(internal_error("Failed to load school year", e)),
    };

    let grade_level = match validate_enrollment(
        &storage,
        &school,
        &student,
        &school_year,
        enroll_data.grade_level_id,
    )
    .await
    {
        Ok(grade_level) => grade_level,
        Err(response) => return Ok(response),
    };

    match storage.create_enrollment(student.id, grade_level.id).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in {} for {} school year",
                student.uuid, grade_level, school_year
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                EnrollmentResponse {
                    enrollment,
                    student,
                    grade_level,
                },
                "Student enrolled successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to enroll student", e)),
    }
}
