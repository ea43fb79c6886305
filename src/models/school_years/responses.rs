use chrono::NaiveDate;
use serde::Serialize;

use super::entities::SchoolYear;

#[derive(Debug, Serialize)]
pub struct SchoolYearListResponse {
    pub items: Vec<SchoolYear>,
}

#[derive(Debug, Serialize)]
pub struct SchoolDaysResponse {
    pub school_year_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub school_days: u32,
}
