//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub name: String,
    pub days_of_week: i32,
    pub default_task_duration: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grade_level_courses::Entity")]
    GradeLevelCourses,
    #[sea_orm(has_many = "super::course_tasks::Entity")]
    CourseTasks,
    #[sea_orm(has_many = "super::course_resources::Entity")]
    CourseResources,
}

impl Related<super::grade_level_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevelCourses.def()
    }
}

impl Related<super::course_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTasks.def()
    }
}

impl Related<super::course_resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseResources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use super::timestamp_to_datetime;
        use crate::utils::DaysOfWeek;

        crate::models::courses::entities::Course {
            id: self.id,
            uuid: self.uuid,
            name: self.name,
            days_of_week: DaysOfWeek::from_bits(self.days_of_week),
            default_task_duration: self.default_task_duration,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
