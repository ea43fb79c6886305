use serde::Serialize;

use super::entities::SchoolBreak;

#[derive(Debug, Serialize)]
pub struct SchoolBreakListResponse {
    pub items: Vec<SchoolBreak>,
}
