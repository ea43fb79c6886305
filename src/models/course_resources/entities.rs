use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 课程资源（教材、练习册等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResource {
    pub id: i64,
    pub uuid: Uuid,
    pub course_id: i64,
    pub title: String,
    pub details: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
