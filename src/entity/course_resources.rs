//! 课程资源实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course_resource(self) -> crate::models::course_resources::entities::CourseResource {
        crate::models::course_resources::entities::CourseResource {
            id: self.id,
            uuid: self.uuid,
            course_id: self.course_id,
            title: self.title,
            details: self.details,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
