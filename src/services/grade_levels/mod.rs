pub mod courses;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::MoveRequest;
use crate::models::grade_levels::requests::{GradeLevelListQuery, GradeLevelRequest};
use crate::storage::Storage;

pub struct GradeLevelService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeLevelService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_grade_levels(
        &self,
        request: &HttpRequest,
        query: GradeLevelListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grade_levels(self, request, query).await
    }

    pub async fn create_grade_level(
        &self,
        request: &HttpRequest,
        grade_level_data: GradeLevelRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade_level(self, request, grade_level_data).await
    }

    pub async fn update_grade_level(
        &self,
        request: &HttpRequest,
        grade_level_id: i64,
        update_data: GradeLevelRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade_level(self, request, grade_level_id, update_data).await
    }

    // 删除年级，同时删除不再属于任何年级的课程
    pub async fn delete_grade_level(
        &self,
        request: &HttpRequest,
        grade_level_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade_level(self, request, grade_level_id).await
    }

    // 年级中按顺序排列的课程
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        grade_level_id: i64,
    ) -> ActixResult<HttpResponse> {
        courses::list_courses(self, request, grade_level_id).await
    }

    // 调整课程在年级中的位置
    pub async fn move_course(
        &self,
        request: &HttpRequest,
        grade_level_id: i64,
        course_uuid: String,
        move_request: MoveRequest,
    ) -> ActixResult<HttpResponse> {
        courses::move_course(self, request, grade_level_id, course_uuid, move_request).await
    }
}
