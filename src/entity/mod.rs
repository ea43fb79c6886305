//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod course_resources;
pub mod course_tasks;
pub mod courses;
pub mod coursework;
pub mod enrollments;
pub mod grade_level_courses;
pub mod grade_levels;
pub mod graded_works;
pub mod grades;
pub mod school_breaks;
pub mod school_years;
pub mod schools;
pub mod students;
pub mod users;

use chrono::{DateTime, Utc};

/// Unix 秒转换为 UTC 时间，越界时取纪元
pub(crate) fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
