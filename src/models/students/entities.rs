use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 学生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub uuid: Uuid,
    pub school_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

// 学生就读于某学年的某个年级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub grade_level_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 任务完成记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coursework {
    pub id: i64,
    pub student_id: i64,
    pub course_task_id: i64,
    pub completed_date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 成绩
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub graded_work_id: i64,
    pub score: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
