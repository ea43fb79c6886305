//! 年级存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::grade_level_courses::{
    Column as GradeLevelCourseColumn, Entity as GradeLevelCourses, Model as GradeLevelCourseModel,
};
use crate::entity::grade_levels::{ActiveModel, Column, Entity as GradeLevels, Relation};
use crate::entity::school_years::Column as SchoolYearColumn;
use crate::errors::{HomeschoolError, Result};
use crate::models::grade_levels::entities::{GradeLevel, OrderedCourse};
use crate::utils::MoveTarget;
use crate::utils::ordering::{changed_positions, move_item};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 列出学校的年级，可按学年筛选
    pub async fn list_grade_levels_impl(
        &self,
        school_id: i64,
        school_year_id: Option<i64>,
    ) -> Result<Vec<GradeLevel>> {
        let mut select = GradeLevels::find()
            .join(JoinType::InnerJoin, Relation::SchoolYear.def())
            .filter(SchoolYearColumn::SchoolId.eq(school_id));

        if let Some(school_year_id) = school_year_id {
            select = select.filter(Column::SchoolYearId.eq(school_year_id));
        }

        let grade_levels = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级列表失败: {e}")))?;

        Ok(grade_levels
            .into_iter()
            .map(|m| m.into_grade_level())
            .collect())
    }

    /// 通过 ID 获取年级
    pub async fn get_grade_level_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<GradeLevel>> {
        let result = GradeLevels::find_by_id(id)
            .join(JoinType::InnerJoin, Relation::SchoolYear.def())
            .filter(SchoolYearColumn::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级失败: {e}")))?;

        Ok(result.map(|m| m.into_grade_level()))
    }

    /// 批量获取属于学校的年级
    pub async fn get_grade_levels_by_ids_impl(
        &self,
        school_id: i64,
        ids: &[i64],
    ) -> Result<Vec<GradeLevel>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let grade_levels = GradeLevels::find()
            .join(JoinType::InnerJoin, Relation::SchoolYear.def())
            .filter(SchoolYearColumn::SchoolId.eq(school_id))
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级失败: {e}")))?;

        Ok(grade_levels
            .into_iter()
            .map(|m| m.into_grade_level())
            .collect())
    }

    /// 创建年级
    pub async fn create_grade_level_impl(
        &self,
        school_year_id: i64,
        name: String,
    ) -> Result<GradeLevel> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            school_year_id: Set(school_year_id),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("创建年级失败: {e}")))?;

        Ok(result.into_grade_level())
    }

    /// 更新年级
    pub async fn update_grade_level_impl(
        &self,
        id: i64,
        school_year_id: i64,
        name: String,
    ) -> Result<Option<GradeLevel>> {
        let existing = GradeLevels::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            school_year_id: Set(school_year_id),
            name: Set(name),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("更新年级失败: {e}")))?;

        Ok(Some(result.into_grade_level()))
    }

    /// 删除年级，并删除因此不再属于任何年级的课程
    pub async fn delete_grade_level_impl(&self, school_id: i64, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let owned = GradeLevels::find_by_id(id)
            .join(JoinType::InnerJoin, Relation::SchoolYear.def())
            .filter(SchoolYearColumn::SchoolId.eq(school_id))
            .one(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级失败: {e}")))?;
        if owned.is_none() {
            return Ok(false);
        }

        let course_ids: Vec<i64> = GradeLevelCourses::find()
            .select_only()
            .column(GradeLevelCourseColumn::CourseId)
            .filter(GradeLevelCourseColumn::GradeLevelId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级课程失败: {e}")))?;

        GradeLevels::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除年级失败: {e}")))?;

        Self::delete_orphan_courses(&txn, course_ids).await?;

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 按顺序列出年级的课程
    pub async fn list_grade_level_courses_impl(
        &self,
        grade_level_id: i64,
    ) -> Result<Vec<OrderedCourse>> {
        let rows = GradeLevelCourses::find()
            .filter(GradeLevelCourseColumn::GradeLevelId.eq(grade_level_id))
            .order_by_asc(GradeLevelCourseColumn::Order)
            .order_by_asc(GradeLevelCourseColumn::Id)
            .find_also_related(Courses)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级课程失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, course)| {
                course.map(|course| OrderedCourse {
                    order: link.order,
                    course: course.into_course(),
                })
            })
            .collect())
    }

    /// 在年级内移动课程
    pub async fn move_grade_level_course_impl(
        &self,
        grade_level_id: i64,
        course_id: i64,
        target: MoveTarget,
    ) -> Result<Option<Vec<OrderedCourse>>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let mut links = Self::ordered_course_links(&txn, grade_level_id).await?;

        let Some(current) = links.iter().position(|link| link.course_id == course_id) else {
            return Ok(None);
        };

        move_item(&mut links, current, target);
        Self::write_course_positions(&txn, &links).await?;

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.list_grade_level_courses_impl(grade_level_id)
            .await
            .map(Some)
    }

    /// 年级内的课程关联，按 (order, id) 排序
    pub(super) async fn ordered_course_links<C>(
        conn: &C,
        grade_level_id: i64,
    ) -> Result<Vec<GradeLevelCourseModel>>
    where
        C: ConnectionTrait,
    {
        GradeLevelCourses::find()
            .filter(GradeLevelCourseColumn::GradeLevelId.eq(grade_level_id))
            .order_by_asc(GradeLevelCourseColumn::Order)
            .order_by_asc(GradeLevelCourseColumn::Id)
            .all(conn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级课程失败: {e}")))
    }

    /// 把列表顺序写回 order 列，只更新发生变化的行
    pub(super) async fn write_course_positions<C>(
        conn: &C,
        links: &[GradeLevelCourseModel],
    ) -> Result<()>
    where
        C: ConnectionTrait,
    {
        for (index, order) in changed_positions(links, |link| link.order) {
            GradeLevelCourses::update_many()
                .col_expr(GradeLevelCourseColumn::Order, Expr::value(order))
                .filter(GradeLevelCourseColumn::Id.eq(links[index].id))
                .exec(conn)
                .await
                .map_err(|e| {
                    HomeschoolError::database_operation(format!("更新课程顺序失败: {e}"))
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};
    use super::*;

    fn names(courses: &[OrderedCourse]) -> Vec<String> {
        courses.iter().map(|c| c.course.name.clone()).collect()
    }

    fn orders(courses: &[OrderedCourse]) -> Vec<i32> {
        courses.iter().map(|c| c.order).collect()
    }

    #[tokio::test]
    async fn test_courses_append_and_move() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;

        let math = fixtures::course(&storage, "Math", &[grade.id]).await;
        fixtures::course(&storage, "Reading", &[grade.id]).await;
        let science = fixtures::course(&storage, "Science", &[grade.id]).await;

        let listed = storage.list_grade_level_courses_impl(grade.id).await.unwrap();
        assert_eq!(names(&listed), ["Math", "Reading", "Science"]);
        assert_eq!(orders(&listed), [0, 1, 2]);

        let moved = storage
            .move_grade_level_course_impl(grade.id, science.id, MoveTarget::Top)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names(&moved), ["Science", "Math", "Reading"]);
        assert_eq!(orders(&moved), [0, 1, 2]);

        let moved = storage
            .move_grade_level_course_impl(grade.id, math.id, MoveTarget::Down)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names(&moved), ["Science", "Reading", "Math"]);
        assert_eq!(orders(&moved), [0, 1, 2]);
    }

    #[tokio::test]
    async fn test_course_delete_closes_order_gap() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let third = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let fourth = fixtures::grade_level(&storage, year.id, "Fourth Grade").await;

        fixtures::course(&storage, "Art", &[fourth.id]).await;
        fixtures::course(&storage, "Math", &[third.id]).await;
        let reading = fixtures::course(&storage, "Reading", &[third.id, fourth.id]).await;
        fixtures::course(&storage, "Science", &[third.id, fourth.id]).await;

        assert!(storage.delete_course_impl(reading.id).await.unwrap());

        let listed = storage.list_grade_level_courses_impl(third.id).await.unwrap();
        assert_eq!(names(&listed), ["Math", "Science"]);
        assert_eq!(orders(&listed), [0, 1]);

        let listed = storage.list_grade_level_courses_impl(fourth.id).await.unwrap();
        assert_eq!(names(&listed), ["Art", "Science"]);
        assert_eq!(orders(&listed), [0, 1]);
    }

    #[tokio::test]
    async fn test_move_unknown_course_is_none() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;

        assert!(
            storage
                .move_grade_level_course_impl(grade.id, 999, MoveTarget::Up)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_lookups_are_scoped_to_school() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;

        assert!(storage.get_grade_level_impl(other.id, grade.id).await.unwrap().is_none());
        assert_eq!(
            storage
                .get_grade_levels_by_ids_impl(school.id, &[grade.id, 999])
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(
            storage
                .get_grade_levels_by_ids_impl(other.id, &[grade.id])
                .await
                .unwrap()
                .is_empty()
        );
        assert!(!storage.delete_grade_level_impl(other.id, grade.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_only_orphaned_courses() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let third = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let fourth = fixtures::grade_level(&storage, year.id, "Fourth Grade").await;

        let orphan = fixtures::course(&storage, "Cursive", &[third.id]).await;
        let shared = fixtures::course(&storage, "Math", &[third.id, fourth.id]).await;

        assert!(storage.delete_grade_level_impl(school.id, third.id).await.unwrap());

        let remaining = Courses::find().all(&storage.db).await.unwrap();
        let ids: Vec<i64> = remaining.iter().map(|c| c.id).collect();
        assert!(!ids.contains(&orphan.id));
        assert!(ids.contains(&shared.id));

        let grade_levels = storage.get_course_grade_levels_impl(shared.id).await.unwrap();
        assert_eq!(grade_levels.len(), 1);
        assert_eq!(grade_levels[0].id, fourth.id);
    }
}
