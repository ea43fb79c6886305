pub mod create;
pub mod delete;
pub mod get;
pub mod move_task;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::course_tasks::entities::CourseTask;
use crate::models::course_tasks::requests::CourseTaskRequest;
use crate::models::schools::entities::School;
use crate::models::{ErrorCode, MoveRequest};
use crate::storage::Storage;

use super::{internal_error, not_found};

pub struct CourseTaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseTaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 课程的全部任务，按顺序排列
    pub async fn list_tasks(
        &self,
        request: &HttpRequest,
        course_uuid: String,
    ) -> ActixResult<HttpResponse> {
        get::list_tasks(self, request, course_uuid).await
    }

    pub async fn create_task(
        &self,
        request: &HttpRequest,
        course_uuid: String,
        task_data: CourseTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, request, course_uuid, task_data).await
    }

    pub async fn get_task(&self, request: &HttpRequest, task_uuid: String) -> ActixResult<HttpResponse> {
        get::get_task(self, request, task_uuid).await
    }

    pub async fn update_task(
        &self,
        request: &HttpRequest,
        task_uuid: String,
        update_data: CourseTaskRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_task(self, request, task_uuid, update_data).await
    }

    pub async fn delete_task(
        &self,
        request: &HttpRequest,
        task_uuid: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_task(self, request, task_uuid).await
    }

    pub async fn move_task(
        &self,
        request: &HttpRequest,
        task_uuid: String,
        move_request: MoveRequest,
    ) -> ActixResult<HttpResponse> {
        move_task::move_task(self, request, task_uuid, move_request).await
    }
}

/// 按 UUID 加载当前学校的任务
pub(crate) async fn load_task(
    storage: &Arc<dyn Storage>,
    school: &School,
    task_uuid: &str,
) -> Result<CourseTask, HttpResponse> {
    match storage.get_course_task_by_uuid(school.id, task_uuid).await {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(not_found(ErrorCode::CourseTaskNotFound, "Course task not found")),
        Err(e) => Err(internal_error("Failed to load course task", e)),
    }
}
