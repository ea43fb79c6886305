//! 任务完成记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coursework")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_task_id: i64,
    pub completed_date: Date,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course_tasks::Entity",
        from = "Column::CourseTaskId",
        to = "super::course_tasks::Column::Id"
    )]
    CourseTask,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_coursework(self) -> crate::models::students::entities::Coursework {
        crate::models::students::entities::Coursework {
            id: self.id,
            student_id: self.student_id,
            course_task_id: self.course_task_id,
            completed_date: self.completed_date,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
