use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::entities::Course;
use crate::models::grade_levels::entities::GradeLevel;

#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub is_running: bool,
    pub grade_levels: Vec<GradeLevel>,
    pub task_count: u64,
}

#[derive(Debug, Serialize)]
pub struct TaskCountResponse {
    pub course_uuid: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub task_count: u32,
}
