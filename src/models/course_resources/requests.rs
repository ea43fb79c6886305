use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CourseResourceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
}
