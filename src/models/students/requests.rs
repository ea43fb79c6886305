use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

// 学生列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct StudentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub grade_level_id: Option<i64>,
}

// 完成任务，日期省略时取当天
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteTaskRequest {
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    pub student_uuid: String,
    pub task_uuid: String,
    pub score: Option<i32>,
}
