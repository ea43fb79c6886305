pub mod auth;
pub mod common;
pub mod course_resources;
pub mod course_tasks;
pub mod courses;
pub mod grade_levels;
pub mod school_breaks;
pub mod school_years;
pub mod schools;
pub mod students;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, FormErrors, MoveRequest, PaginationInfo, PaginationQuery,
};

/// 进程启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
