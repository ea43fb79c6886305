use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::DateRange;

// 学校假期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolBreak {
    pub id: i64,
    pub uuid: Uuid,
    pub school_year_id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SchoolBreak {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

// 校验通过后的假期字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolBreakInput {
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
