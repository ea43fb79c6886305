use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::courses::entities::Course;

// 年级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeLevel {
    pub id: i64,
    pub uuid: Uuid,
    pub school_year_id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// 年级中的课程及其排序位置
#[derive(Debug, Clone, Serialize)]
pub struct OrderedCourse {
    pub order: i32,
    pub course: Course,
}
