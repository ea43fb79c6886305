use chrono::NaiveDate;
use serde::Deserialize;

use crate::utils::DaysOfWeek;

// 创建或更新学年
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolYearRequest {
    /// 省略时使用当前用户的学校
    pub school_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_of_week: DaysOfWeek,
}

// 上课日统计查询
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolDaysQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
