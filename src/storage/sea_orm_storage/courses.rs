//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::course_tasks::{Column as CourseTaskColumn, Entity as CourseTasks};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::grade_level_courses::{
    ActiveModel as GradeLevelCourseActiveModel, Column as GradeLevelCourseColumn,
    Entity as GradeLevelCourses, Relation as GradeLevelCourseRelation,
};
use crate::entity::grade_levels::{
    Column as GradeLevelColumn, Entity as GradeLevels, Relation as GradeLevelRelation,
};
use crate::entity::school_years::Column as SchoolYearColumn;
use crate::errors::{HomeschoolError, Result};
use crate::models::courses::entities::{Course, CourseInput};
use crate::models::grade_levels::entities::GradeLevel;
use crate::utils::ordering::next_position;
use crate::utils::parse_uuid;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程并追加到每个年级的课程末尾
    pub async fn create_course_impl(
        &self,
        input: CourseInput,
        grade_level_ids: &[i64],
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let course = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            name: Set(input.name),
            days_of_week: Set(input.days_of_week.bits()),
            default_task_duration: Set(input.default_task_duration),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HomeschoolError::database_operation(format!("创建课程失败: {e}")))?;

        for &grade_level_id in grade_level_ids {
            let max_order = GradeLevelCourses::find()
                .select_only()
                .column_as(GradeLevelCourseColumn::Order.max(), "max_order")
                .filter(GradeLevelCourseColumn::GradeLevelId.eq(grade_level_id))
                .into_tuple::<Option<i32>>()
                .one(&txn)
                .await
                .map_err(|e| {
                    HomeschoolError::database_operation(format!("查询课程顺序失败: {e}"))
                })?
                .flatten();

            GradeLevelCourseActiveModel {
                grade_level_id: Set(grade_level_id),
                course_id: Set(course.id),
                order: Set(next_position(max_order)),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("关联课程年级失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(course.into_course())
    }

    /// 通过 UUID 获取属于学校的课程
    pub async fn get_course_by_uuid_impl(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<Course>> {
        let Some(uuid) = parse_uuid(uuid) else {
            return Ok(None);
        };

        let result = Courses::find()
            .filter(Column::Uuid.eq(uuid))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程失败: {e}")))?;

        match result {
            Some(course) if self.course_belongs_to_impl(course.id, school_id).await? => {
                Ok(Some(course.into_course()))
            }
            _ => Ok(None),
        }
    }

    /// 课程是否有年级属于该学校的学年
    pub async fn course_belongs_to_impl(&self, course_id: i64, school_id: i64) -> Result<bool> {
        let count = GradeLevelCourses::find()
            .join(JoinType::InnerJoin, GradeLevelCourseRelation::GradeLevel.def())
            .join(JoinType::InnerJoin, GradeLevelRelation::SchoolYear.def())
            .filter(GradeLevelCourseColumn::CourseId.eq(course_id))
            .filter(SchoolYearColumn::SchoolId.eq(school_id))
            .count(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程归属失败: {e}")))?;

        Ok(count > 0)
    }

    /// 课程所属的年级
    pub async fn get_course_grade_levels_impl(&self, course_id: i64) -> Result<Vec<GradeLevel>> {
        let grade_levels = GradeLevels::find()
            .join(JoinType::InnerJoin, GradeLevelRelation::GradeLevelCourses.def())
            .filter(GradeLevelCourseColumn::CourseId.eq(course_id))
            .order_by_asc(GradeLevelColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程年级失败: {e}")))?;

        Ok(grade_levels
            .into_iter()
            .map(|m| m.into_grade_level())
            .collect())
    }

    /// 统计课程任务数
    pub async fn count_course_tasks_impl(&self, course_id: i64) -> Result<u64> {
        CourseTasks::find()
            .filter(CourseTaskColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("统计课程任务失败: {e}")))
    }

    /// 更新课程
    pub async fn update_course_impl(&self, id: i64, input: CourseInput) -> Result<Option<Course>> {
        let existing = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(input.name),
            days_of_week: Set(input.days_of_week.bits()),
            default_task_duration: Set(input.default_task_duration),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(result.into_course()))
    }

    /// 删除课程，任务与资源随之级联删除，各年级剩余课程重新编号
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let grade_level_ids: Vec<i64> = GradeLevelCourses::find()
            .select_only()
            .column(GradeLevelCourseColumn::GradeLevelId)
            .filter(GradeLevelCourseColumn::CourseId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程年级失败: {e}")))?;

        let result = Courses::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除课程失败: {e}")))?;

        for grade_level_id in grade_level_ids {
            let links = Self::ordered_course_links(&txn, grade_level_id).await?;
            Self::write_course_positions(&txn, &links).await?;
        }

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除候选课程中已不属于任何年级的课程
    pub(super) async fn delete_orphan_courses<C>(conn: &C, candidates: Vec<i64>) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if candidates.is_empty() {
            return Ok(0);
        }

        let linked = GradeLevelCourses::find()
            .select_only()
            .column(GradeLevelCourseColumn::CourseId)
            .into_query();

        let result = Courses::delete_many()
            .filter(Column::Id.is_in(candidates))
            .filter(Column::Id.not_in_subquery(linked))
            .exec(conn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除孤立课程失败: {e}")))?;

        if result.rows_affected > 0 {
            tracing::info!("已删除 {} 个不再属于任何年级的课程", result.rows_affected);
        }

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};
    use super::*;
    use crate::utils::DaysOfWeek;

    #[tokio::test]
    async fn test_course_ownership_follows_grade_levels() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let course = fixtures::course(&storage, "Math", &[grade.id]).await;

        assert!(storage.course_belongs_to_impl(course.id, school.id).await.unwrap());
        assert!(!storage.course_belongs_to_impl(course.id, other.id).await.unwrap());

        let uuid = course.uuid.to_string();
        assert_eq!(
            storage.get_course_by_uuid_impl(school.id, &uuid).await.unwrap(),
            Some(course.clone())
        );
        assert!(storage.get_course_by_uuid_impl(other.id, &uuid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_uuid_is_not_found() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;

        for raw in ["", "abc", "00000000-0000-0000-0000", "💥"] {
            assert!(storage.get_course_by_uuid_impl(school.id, raw).await.unwrap().is_none());
        }
        let missing = uuid::Uuid::new_v4().to_string();
        assert!(storage.get_course_by_uuid_impl(school.id, &missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_course() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let course = fixtures::course(&storage, "Math", &[grade.id]).await;

        let updated = storage
            .update_course_impl(
                course.id,
                CourseInput {
                    name: "Geometry".to_string(),
                    days_of_week: DaysOfWeek::NO_DAYS,
                    default_task_duration: 45,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Geometry");
        assert!(!updated.is_running());
        assert_eq!(updated.default_task_duration, 45);
        assert_eq!(updated.uuid, course.uuid);
    }

    #[tokio::test]
    async fn test_delete_course() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let course = fixtures::course(&storage, "Math", &[grade.id]).await;

        assert!(storage.delete_course_impl(course.id).await.unwrap());
        assert!(!storage.delete_course_impl(course.id).await.unwrap());
        assert!(storage.list_grade_level_courses_impl(grade.id).await.unwrap().is_empty());
    }
}
