//! 课程任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub course_id: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub duration: i32,
    pub grade_level_id: Option<i64>,
    pub order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::grade_levels::Entity",
        from = "Column::GradeLevelId",
        to = "super::grade_levels::Column::Id"
    )]
    GradeLevel,
    #[sea_orm(has_one = "super::graded_works::Entity")]
    GradedWork,
    #[sea_orm(has_many = "super::coursework::Entity")]
    Coursework,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevel.def()
    }
}

impl Related<super::graded_works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradedWork.def()
    }
}

impl Related<super::coursework::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coursework.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 是否计分由 graded_works 表决定，需要调用方传入
    pub fn into_course_task(self, is_graded: bool) -> crate::models::course_tasks::entities::CourseTask {
        use super::timestamp_to_datetime;

        crate::models::course_tasks::entities::CourseTask {
            id: self.id,
            uuid: self.uuid,
            course_id: self.course_id,
            description: self.description,
            duration: self.duration,
            grade_level_id: self.grade_level_id,
            order: self.order,
            is_graded,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
