pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::school_breaks::requests::{SchoolBreakListQuery, SchoolBreakRequest};
use crate::storage::Storage;

pub struct SchoolBreakService {
    storage: Option<Arc<dyn Storage>>,
}

impl SchoolBreakService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 假期列表，可按学年过滤
    pub async fn list_school_breaks(
        &self,
        request: &HttpRequest,
        query: SchoolBreakListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_school_breaks(self, request, query).await
    }

    pub async fn get_school_break(
        &self,
        request: &HttpRequest,
        school_break_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_school_break(self, request, school_break_id).await
    }

    pub async fn create_school_break(
        &self,
        request: &HttpRequest,
        school_break_data: SchoolBreakRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_school_break(self, request, school_break_data).await
    }

    pub async fn update_school_break(
        &self,
        request: &HttpRequest,
        school_break_id: i64,
        update_data: SchoolBreakRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_school_break(self, request, school_break_id, update_data).await
    }

    pub async fn delete_school_break(
        &self,
        request: &HttpRequest,
        school_break_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_school_break(self, request, school_break_id).await
    }
}
