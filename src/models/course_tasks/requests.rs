use serde::Deserialize;

// 创建或更新任务
#[derive(Debug, Clone, Deserialize)]
pub struct CourseTaskRequest {
    #[serde(default)]
    pub description: String,
    /// 省略时使用课程的默认时长
    pub duration: Option<i32>,
    pub grade_level_id: Option<i64>,
    #[serde(default)]
    pub is_graded: bool,
}
