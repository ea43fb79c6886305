use chrono::NaiveDate;
use serde::Serialize;

use super::entities::{Enrollment, Student};
use crate::models::PaginationInfo;
use crate::models::course_tasks::entities::CourseTask;
use crate::models::courses::entities::Course;
use crate::models::grade_levels::entities::GradeLevel;

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub enrollment: Enrollment,
    pub student: Student,
    pub grade_level: GradeLevel,
}

// 学生视角下的一项任务
#[derive(Debug, Serialize)]
pub struct StudentTaskItem {
    pub task: CourseTask,
    pub completed_date: Option<NaiveDate>,
    pub score: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct StudentCourseResponse {
    pub student: Student,
    pub course: Course,
    pub tasks: Vec<StudentTaskItem>,
}
