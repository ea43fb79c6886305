pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::FormErrors;
use crate::models::course_resources::entities::CourseResource;
use crate::models::course_resources::requests::CourseResourceRequest;
use crate::models::schools::entities::School;
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::validate::{RESOURCE_TITLE_MAX_LEN, validate_required_text};

use super::{internal_error, not_found};

pub struct CourseResourceService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseResourceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_resources(
        &self,
        request: &HttpRequest,
        course_uuid: String,
    ) -> ActixResult<HttpResponse> {
        list::list_resources(self, request, course_uuid).await
    }

    pub async fn create_resource(
        &self,
        request: &HttpRequest,
        course_uuid: String,
        resource_data: CourseResourceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_resource(self, request, course_uuid, resource_data).await
    }

    pub async fn update_resource(
        &self,
        request: &HttpRequest,
        resource_uuid: String,
        update_data: CourseResourceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_resource(self, request, resource_uuid, update_data).await
    }

    pub async fn delete_resource(
        &self,
        request: &HttpRequest,
        resource_uuid: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_resource(self, request, resource_uuid).await
    }
}

/// 标题必填，详情可为空；返回去掉首尾空白后的 `(title, details)`
pub fn check_resource(request: &CourseResourceRequest) -> Result<(String, String), FormErrors> {
    let mut errors = FormErrors::new();
    if let Err(msg) = validate_required_text(&request.title, RESOURCE_TITLE_MAX_LEN) {
        errors.add_field("title", msg);
    }
    errors.into_result()?;
    Ok((
        request.title.trim().to_string(),
        request.details.trim().to_string(),
    ))
}

pub(crate) async fn load_resource(
    storage: &Arc<dyn Storage>,
    school: &School,
    resource_uuid: &str,
) -> Result<CourseResource, HttpResponse> {
    match storage
        .get_course_resource_by_uuid(school.id, resource_uuid)
        .await
    {
        Ok(Some(resource)) => Ok(resource),
        Ok(None) => Err(not_found(
            ErrorCode::CourseResourceNotFound,
            "Course resource not found",
        )),
        Err(e) => Err(internal_error("Failed to load course resource", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_resource() {
        let request = CourseResourceRequest {
            title: " Saxon Math 5/4 ".to_string(),
            details: "".to_string(),
        };
        let (title, details) = check_resource(&request).unwrap();
        assert_eq!(title, "Saxon Math 5/4");
        assert!(details.is_empty());

        let request = CourseResourceRequest {
            title: "".to_string(),
            details: "Workbook".to_string(),
        };
        assert!(check_resource(&request).unwrap_err().has_field("title"));
    }
}
