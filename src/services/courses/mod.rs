pub mod create;
pub mod delete;
pub mod get;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CreateCourseRequest, TaskCountQuery, UpdateCourseRequest};
use crate::models::schools::entities::School;
use crate::models::ErrorCode;
use crate::storage::Storage;

use super::{internal_error, not_found};

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 课程详情，包含所属年级与任务数
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_uuid: String,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_uuid).await
    }

    pub async fn count_tasks(
        &self,
        request: &HttpRequest,
        course_uuid: String,
        query: TaskCountQuery,
    ) -> ActixResult<HttpResponse> {
        get::count_tasks(self, request, course_uuid, query).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_uuid: String,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_uuid, update_data).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_uuid: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_uuid).await
    }
}

/// 按 UUID 加载当前学校的课程，任务与资源服务共用
pub(crate) async fn load_course(
    storage: &Arc<dyn Storage>,
    school: &School,
    course_uuid: &str,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_uuid(school.id, course_uuid).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Err(internal_error("Failed to load course", e)),
    }
}
