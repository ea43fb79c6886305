use super::entities::School;
use crate::models::school_years::entities::SchoolYear;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SchoolResponse {
    pub school: School,
    pub school_years: Vec<SchoolYear>,
}
