//! 课程任务存储操作

use super::SeaOrmStorage;
use crate::entity::course_tasks::{ActiveModel, Column, Entity as CourseTasks, Model};
use crate::entity::graded_works::{
    ActiveModel as GradedWorkActiveModel, Column as GradedWorkColumn, Entity as GradedWorks,
};
use crate::errors::{HomeschoolError, Result};
use crate::models::course_tasks::entities::{CourseTask, CourseTaskInput};
use crate::utils::ordering::{changed_positions, move_item, next_position};
use crate::utils::{MoveTarget, parse_uuid};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 按顺序列出课程任务
    pub async fn list_course_tasks_impl(&self, course_id: i64) -> Result<Vec<CourseTask>> {
        let rows = CourseTasks::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Order)
            .order_by_asc(Column::Id)
            .find_also_related(GradedWorks)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(task, graded)| task.into_course_task(graded.is_some()))
            .collect())
    }

    /// 通过 UUID 获取属于学校的任务
    pub async fn get_course_task_by_uuid_impl(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<CourseTask>> {
        let Some(uuid) = parse_uuid(uuid) else {
            return Ok(None);
        };

        let result = CourseTasks::find()
            .filter(Column::Uuid.eq(uuid))
            .find_also_related(GradedWorks)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))?;

        match result {
            Some((task, graded)) if self.course_belongs_to_impl(task.course_id, school_id).await? => {
                Ok(Some(task.into_course_task(graded.is_some())))
            }
            _ => Ok(None),
        }
    }

    /// 创建任务，追加到课程末尾
    pub async fn create_course_task_impl(
        &self,
        course_id: i64,
        input: CourseTaskInput,
    ) -> Result<CourseTask> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let max_order = CourseTasks::find()
            .select_only()
            .column_as(Column::Order.max(), "max_order")
            .filter(Column::CourseId.eq(course_id))
            .into_tuple::<Option<i32>>()
            .one(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询任务顺序失败: {e}")))?
            .flatten();

        let task = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            course_id: Set(course_id),
            description: Set(input.description),
            duration: Set(input.duration),
            grade_level_id: Set(input.grade_level_id),
            order: Set(next_position(max_order)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HomeschoolError::database_operation(format!("创建课程任务失败: {e}")))?;

        if input.is_graded {
            Self::insert_graded_work(&txn, task.id).await?;
        }

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(task.into_course_task(input.is_graded))
    }

    /// 更新任务，同步计分标记
    pub async fn update_course_task_impl(
        &self,
        id: i64,
        input: CourseTaskInput,
    ) -> Result<Option<CourseTask>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let Some((_, graded)) = CourseTasks::find_by_id(id)
            .find_also_related(GradedWorks)
            .one(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))?
        else {
            return Ok(None);
        };

        let task = ActiveModel {
            id: Set(id),
            description: Set(input.description),
            duration: Set(input.duration),
            grade_level_id: Set(input.grade_level_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| HomeschoolError::database_operation(format!("更新课程任务失败: {e}")))?;

        match (input.is_graded, graded) {
            (true, None) => Self::insert_graded_work(&txn, id).await?,
            // 取消计分时成绩随计分作业级联删除
            (false, Some(graded)) => {
                GradedWorks::delete_by_id(graded.id)
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        HomeschoolError::database_operation(format!("删除计分作业失败: {e}"))
                    })?;
            }
            _ => {}
        }

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(task.into_course_task(input.is_graded)))
    }

    /// 删除任务，其后的任务前移
    pub async fn delete_course_task_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(task) = CourseTasks::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))?
        else {
            return Ok(false);
        };

        CourseTasks::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除课程任务失败: {e}")))?;

        let siblings = Self::ordered_tasks(&txn, task.course_id).await?;
        Self::write_task_positions(&txn, &siblings).await?;

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 在课程内移动任务
    pub async fn move_course_task_impl(
        &self,
        id: i64,
        target: MoveTarget,
    ) -> Result<Option<CourseTask>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(task) = CourseTasks::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut siblings = Self::ordered_tasks(&txn, task.course_id).await?;
        if let Some(current) = siblings.iter().position(|sibling| sibling.id == id) {
            move_item(&mut siblings, current, target);
            Self::write_task_positions(&txn, &siblings).await?;
        }

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        let moved = CourseTasks::find_by_id(id)
            .find_also_related(GradedWorks)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))?;

        Ok(moved.map(|(task, graded)| task.into_course_task(graded.is_some())))
    }

    async fn ordered_tasks<C>(conn: &C, course_id: i64) -> Result<Vec<Model>>
    where
        C: ConnectionTrait,
    {
        CourseTasks::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Order)
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程任务失败: {e}")))
    }

    /// 把列表顺序写回 order 列，只更新发生变化的行
    async fn write_task_positions<C>(conn: &C, tasks: &[Model]) -> Result<()>
    where
        C: ConnectionTrait,
    {
        for (index, order) in changed_positions(tasks, |task| task.order) {
            CourseTasks::update_many()
                .col_expr(Column::Order, Expr::value(order))
                .filter(Column::Id.eq(tasks[index].id))
                .exec(conn)
                .await
                .map_err(|e| {
                    HomeschoolError::database_operation(format!("更新任务顺序失败: {e}"))
                })?;
        }
        Ok(())
    }

    async fn insert_graded_work<C>(conn: &C, course_task_id: i64) -> Result<()>
    where
        C: ConnectionTrait,
    {
        GradedWorkActiveModel {
            course_task_id: Set(course_task_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| HomeschoolError::database_operation(format!("创建计分作业失败: {e}")))?;
        Ok(())
    }

    /// 任务对应的计分作业 id
    pub(super) async fn graded_work_id_for_task<C>(
        conn: &C,
        course_task_id: i64,
    ) -> Result<Option<i64>>
    where
        C: ConnectionTrait,
    {
        GradedWorks::find()
            .select_only()
            .column(GradedWorkColumn::Id)
            .filter(GradedWorkColumn::CourseTaskId.eq(course_task_id))
            .into_tuple::<i64>()
            .one(conn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询计分作业失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};
    use super::*;
    use crate::models::courses::entities::Course;
    use crate::models::schools::entities::School;

    async fn setup() -> (SeaOrmStorage, School, Course) {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let course = fixtures::course(&storage, "Math", &[grade.id]).await;
        (storage, school, course)
    }

    fn task_input(description: &str) -> CourseTaskInput {
        CourseTaskInput {
            description: description.to_string(),
            duration: 30,
            grade_level_id: None,
            is_graded: false,
        }
    }

    async fn descriptions(storage: &SeaOrmStorage, course_id: i64) -> (String, Vec<i32>) {
        let tasks = storage.list_course_tasks_impl(course_id).await.unwrap();
        let names = tasks.iter().map(|t| t.description.as_str()).collect::<String>();
        let orders = tasks.iter().map(|t| t.order).collect();
        (names, orders)
    }

    #[tokio::test]
    async fn test_order_stays_contiguous() {
        let (storage, _, course) = setup().await;
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let task = storage
                .create_course_task_impl(course.id, task_input(name))
                .await
                .unwrap();
            ids.push(task.id);
        }
        assert_eq!(descriptions(&storage, course.id).await, ("abcd".to_string(), vec![0, 1, 2, 3]));

        let moved = storage
            .move_course_task_impl(ids[0], MoveTarget::Bottom)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.order, 3);
        assert_eq!(descriptions(&storage, course.id).await, ("bcda".to_string(), vec![0, 1, 2, 3]));

        storage
            .move_course_task_impl(ids[3], MoveTarget::Position(1))
            .await
            .unwrap();
        assert_eq!(descriptions(&storage, course.id).await, ("bdca".to_string(), vec![0, 1, 2, 3]));

        assert!(storage.delete_course_task_impl(ids[3]).await.unwrap());
        assert_eq!(descriptions(&storage, course.id).await, ("bca".to_string(), vec![0, 1, 2]));

        let task = storage
            .create_course_task_impl(course.id, task_input("e"))
            .await
            .unwrap();
        assert_eq!(task.order, 3);
    }

    #[tokio::test]
    async fn test_malformed_task_uuid_returns_none() {
        let (storage, school, course) = setup().await;
        storage
            .create_course_task_impl(course.id, task_input("Read chapter 1"))
            .await
            .unwrap();

        for raw in ["", "not-a-uuid", "123", "../../etc/passwd"] {
            assert!(
                storage
                    .get_course_task_by_uuid_impl(school.id, raw)
                    .await
                    .unwrap()
                    .is_none()
            );
        }
    }

    #[tokio::test]
    async fn test_task_lookup_is_scoped() {
        let (storage, school, course) = setup().await;
        let other = fixtures::school(&storage, "bob").await;
        let task = storage
            .create_course_task_impl(course.id, task_input("Read chapter 1"))
            .await
            .unwrap();

        let uuid = task.uuid.to_string();
        assert_eq!(
            storage.get_course_task_by_uuid_impl(school.id, &uuid).await.unwrap(),
            Some(task)
        );
        assert!(storage.get_course_task_by_uuid_impl(other.id, &uuid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_graded_flag_round_trips_through_update() {
        let (storage, _, course) = setup().await;
        let task = storage
            .create_course_task_impl(
                course.id,
                CourseTaskInput {
                    is_graded: true,
                    ..task_input("Quiz")
                },
            )
            .await
            .unwrap();
        assert!(task.is_graded);
        assert!(
            SeaOrmStorage::graded_work_id_for_task(&storage.db, task.id)
                .await
                .unwrap()
                .is_some()
        );

        let updated = storage
            .update_course_task_impl(task.id, task_input("Practice"))
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.is_graded);
        assert_eq!(updated.description, "Practice");
        assert!(
            SeaOrmStorage::graded_work_id_for_task(&storage.db, task.id)
                .await
                .unwrap()
                .is_none()
        );

        assert_eq!(storage.count_course_tasks_impl(course.id).await.unwrap(), 1);
        assert!(storage.update_course_task_impl(999, task_input("x")).await.unwrap().is_none());
    }
}
