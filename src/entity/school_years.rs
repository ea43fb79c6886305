//! 学年实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "school_years")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub school_id: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub days_of_week: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(has_many = "super::school_breaks::Entity")]
    SchoolBreaks,
    #[sea_orm(has_many = "super::grade_levels::Entity")]
    GradeLevels,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::school_breaks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolBreaks.def()
    }
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_school_year(self) -> crate::models::school_years::entities::SchoolYear {
        use super::timestamp_to_datetime;
        use crate::models::school_years::entities::SchoolYear;
        use crate::utils::DaysOfWeek;

        SchoolYear {
            id: self.id,
            uuid: self.uuid,
            school_id: self.school_id,
            start_date: self.start_date,
            end_date: self.end_date,
            days_of_week: DaysOfWeek::from_bits(self.days_of_week),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
