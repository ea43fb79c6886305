use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::grade_levels::entities::GradeLevel;
use crate::models::school_breaks::entities::SchoolBreak;
use crate::utils::{DateRange, DaysOfWeek};

// 学年
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYear {
    pub id: i64,
    pub uuid: Uuid,
    pub school_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_of_week: DaysOfWeek,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SchoolYear {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.range().contains(day)
    }
}

/// 以起止年份表示，如 `2024–2025`
impl std::fmt::Display for SchoolYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start_date.year(), self.end_date.year())
    }
}

/// 学年及其假期、年级
#[derive(Debug, Clone, Serialize)]
pub struct SchoolYearDetail {
    #[serde(flatten)]
    pub school_year: SchoolYear,
    pub breaks: Vec<SchoolBreak>,
    pub grade_levels: Vec<GradeLevel>,
}

impl SchoolYearDetail {
    /// 该日期是否落在任一假期内
    pub fn is_break(&self, day: NaiveDate) -> bool {
        self.breaks.iter().any(|school_break| school_break.range().contains(day))
    }

    /// 学年内、星期掩码命中且不在假期中的日期才算上课日
    pub fn runs_on(&self, day: NaiveDate) -> bool {
        self.school_year.contains(day)
            && self.school_year.days_of_week.runs_on(day)
            && !self.is_break(day)
    }

    /// 统计范围内的上课日（包含首尾）
    pub fn school_days_in_range(&self, range: &DateRange) -> u32 {
        if !range.overlaps(&self.school_year.range()) {
            return 0;
        }
        range.count_matching(|day| self.runs_on(day))
    }
}

// 校验通过后的学年字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolYearInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_of_week: DaysOfWeek,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn year() -> SchoolYear {
        let now = chrono::Utc::now();
        SchoolYear {
            id: 1,
            uuid: Uuid::new_v4(),
            school_id: 1,
            start_date: d(2024, 9, 1),
            end_date: d(2025, 6, 1),
            days_of_week: DaysOfWeek::WEEKDAYS,
            created_at: now,
            updated_at: now,
        }
    }

    fn school_break(start: NaiveDate, end: NaiveDate) -> SchoolBreak {
        let now = chrono::Utc::now();
        SchoolBreak {
            id: 1,
            uuid: Uuid::new_v4(),
            school_year_id: 1,
            description: "Thanksgiving".to_string(),
            start_date: start,
            end_date: end,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_display_uses_years() {
        assert_eq!(year().to_string(), "2024–2025");
    }

    #[test]
    fn test_runs_on_skips_breaks_and_bounds() {
        let detail = SchoolYearDetail {
            school_year: year(),
            breaks: vec![school_break(d(2024, 11, 25), d(2024, 11, 29))],
            grade_levels: vec![],
        };
        // 2024-11-25 是周一
        assert!(detail.is_break(d(2024, 11, 25)));
        assert!(!detail.runs_on(d(2024, 11, 25)));
        assert!(detail.runs_on(d(2024, 12, 2)));
        // 周日
        assert!(!detail.runs_on(d(2024, 12, 1)));
        // 学年之外
        assert!(!detail.runs_on(d(2024, 8, 30)));
    }

    #[test]
    fn test_school_days_in_range() {
        let detail = SchoolYearDetail {
            school_year: year(),
            breaks: vec![school_break(d(2024, 11, 25), d(2024, 11, 29))],
            grade_levels: vec![],
        };
        // 2024-11-18 至 2024-12-01：两周，其中第二周整周放假
        let range = DateRange::new(d(2024, 11, 18), d(2024, 12, 1));
        assert_eq!(detail.school_days_in_range(&range), 5);

        let before = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        assert_eq!(detail.school_days_in_range(&before), 0);
    }
}
