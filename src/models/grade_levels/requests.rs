use serde::Deserialize;

// 创建或更新年级
#[derive(Debug, Clone, Deserialize)]
pub struct GradeLevelRequest {
    pub school_year_id: Option<i64>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeLevelListQuery {
    pub school_year_id: Option<i64>,
}
