use chrono::NaiveDate;
use serde::Deserialize;

use crate::utils::DaysOfWeek;

// 创建课程，至少关联一个年级
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub days_of_week: DaysOfWeek,
    pub default_task_duration: Option<i32>,
    #[serde(default)]
    pub grade_level_ids: Vec<i64>,
}

// 更新课程
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub days_of_week: DaysOfWeek,
    pub default_task_duration: Option<i32>,
}

// 任务数量查询
#[derive(Debug, Clone, Deserialize)]
pub struct TaskCountQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
