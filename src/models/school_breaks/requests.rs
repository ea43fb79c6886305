use chrono::NaiveDate;
use serde::Deserialize;

// 创建或更新假期
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolBreakRequest {
    pub school_year_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchoolBreakListQuery {
    pub school_year_id: Option<i64>,
}
