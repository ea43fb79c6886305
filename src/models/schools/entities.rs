use serde::{Deserialize, Serialize};

// 学校，每个管理员恰好拥有一所
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub admin_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
