pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::school_years::requests::{SchoolDaysQuery, SchoolYearRequest};
use crate::storage::Storage;

pub struct SchoolYearService {
    storage: Option<Arc<dyn Storage>>,
}

impl SchoolYearService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 当前学校的学年列表
    pub async fn list_school_years(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_school_years(self, request).await
    }

    pub async fn create_school_year(
        &self,
        request: &HttpRequest,
        school_year_data: SchoolYearRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_school_year(self, request, school_year_data).await
    }

    // 学年详情，包含假期与年级
    pub async fn get_school_year(
        &self,
        request: &HttpRequest,
        school_year_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_school_year(self, request, school_year_id).await
    }

    // 统计日期范围内的上课日
    pub async fn count_school_days(
        &self,
        request: &HttpRequest,
        school_year_id: i64,
        query: SchoolDaysQuery,
    ) -> ActixResult<HttpResponse> {
        get::count_school_days(self, request, school_year_id, query).await
    }

    pub async fn update_school_year(
        &self,
        request: &HttpRequest,
        school_year_id: i64,
        update_data: SchoolYearRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_school_year(self, request, school_year_id, update_data).await
    }

    // 删除学年，级联删除假期、年级以及因此失去年级的课程
    pub async fn delete_school_year(
        &self,
        request: &HttpRequest,
        school_year_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_school_year(self, request, school_year_id).await
    }
}
