use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 课程任务：学生需要完成的一项学习活动
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTask {
    pub id: i64,
    pub uuid: Uuid,
    pub course_id: i64,
    pub description: String,
    /// 预计时长（分钟）
    pub duration: i32,
    /// 仅对某个年级可见时设置
    pub grade_level_id: Option<i64>,
    pub order: i32,
    pub is_graded: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl CourseTask {
    /// 任务对就读于给定年级的学生是否可见
    pub fn is_visible_to(&self, enrolled_grade_level_ids: &[i64]) -> bool {
        match self.grade_level_id {
            None => true,
            Some(grade_level_id) => enrolled_grade_level_ids.contains(&grade_level_id),
        }
    }
}

// 校验通过后的任务字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTaskInput {
    pub description: String,
    pub duration: i32,
    pub grade_level_id: Option<i64>,
    pub is_graded: bool,
}
