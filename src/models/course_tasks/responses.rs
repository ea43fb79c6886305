use serde::Serialize;
use uuid::Uuid;

use super::entities::CourseTask;

#[derive(Debug, Serialize)]
pub struct CourseTaskListResponse {
    pub course_uuid: Uuid,
    pub items: Vec<CourseTask>,
}
