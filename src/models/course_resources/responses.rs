use serde::Serialize;
use uuid::Uuid;

use super::entities::CourseResource;

#[derive(Debug, Serialize)]
pub struct CourseResourceListResponse {
    pub course_uuid: Uuid,
    pub items: Vec<CourseResource>,
}
