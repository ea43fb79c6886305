use serde::Serialize;

use super::entities::{GradeLevel, OrderedCourse};

#[derive(Debug, Serialize)]
pub struct GradeLevelListResponse {
    pub items: Vec<GradeLevel>,
}

#[derive(Debug, Serialize)]
pub struct GradeLevelCoursesResponse {
    pub grade_level: GradeLevel,
    pub courses: Vec<OrderedCourse>,
}
