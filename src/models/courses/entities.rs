use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::DaysOfWeek;

// 课程：某一学科下任务的容器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub days_of_week: DaysOfWeek,
    /// 新任务的默认时长（分钟）
    pub default_task_duration: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 每周至少有一天开课
    pub fn is_running(&self) -> bool {
        self.days_of_week != DaysOfWeek::NO_DAYS
    }

    pub fn runs_on(&self, day: NaiveDate) -> bool {
        self.days_of_week.runs_on(day)
    }

    /// 日期范围内的任务数（包含首尾），`start > end` 时只看 `start` 当天
    pub fn task_count_in_range(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        self.days_of_week.task_count_in_range(start, end)
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// 校验通过后的课程字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInput {
    pub name: String,
    pub days_of_week: DaysOfWeek,
    pub default_task_duration: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(days: DaysOfWeek) -> Course {
        let now = chrono::Utc::now();
        Course {
            id: 1,
            uuid: Uuid::new_v4(),
            name: "Math".to_string(),
            days_of_week: days,
            default_task_duration: 30,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_running() {
        assert!(!course(DaysOfWeek::NO_DAYS).is_running());
        assert!(course(DaysOfWeek::FRIDAY).is_running());
    }

    #[test]
    fn test_task_count_delegates_to_mask() {
        let start = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
        let math = course(DaysOfWeek::MONDAY | DaysOfWeek::WEDNESDAY);
        assert_eq!(math.task_count_in_range(start, end), 4);
        assert_eq!(math.task_count_in_range(end, start), 0);
        assert_eq!(course(DaysOfWeek::NO_DAYS).task_count_in_range(start, end), 0);
    }
}
