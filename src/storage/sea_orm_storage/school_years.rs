//! 学年存储操作

use super::SeaOrmStorage;
use crate::entity::grade_level_courses::{
    Column as GradeLevelCourseColumn, Entity as GradeLevelCourses,
    Relation as GradeLevelCourseRelation,
};
use crate::entity::grade_levels::{Column as GradeLevelColumn, Entity as GradeLevels};
use crate::entity::school_breaks::{Column as SchoolBreakColumn, Entity as SchoolBreaks};
use crate::entity::school_years::{ActiveModel, Column, Entity as SchoolYears};
use crate::errors::{HomeschoolError, Result};
use crate::models::school_years::entities::{SchoolYear, SchoolYearDetail, SchoolYearInput};
use crate::utils::{DateRange, parse_uuid};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出学校的所有学年
    pub async fn list_school_years_impl(&self, school_id: i64) -> Result<Vec<SchoolYear>> {
        let years = SchoolYears::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学年列表失败: {e}")))?;

        Ok(years.into_iter().map(|m| m.into_school_year()).collect())
    }

    /// 通过 ID 获取学年
    pub async fn get_school_year_impl(&self, school_id: i64, id: i64) -> Result<Option<SchoolYear>> {
        let result = SchoolYears::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_school_year()))
    }

    /// 不限学校地按 ID 查找学年，用于区分"不存在"与"不属于当前学校"
    pub async fn find_school_year_by_id_impl(&self, id: i64) -> Result<Option<SchoolYear>> {
        let result = SchoolYears::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_school_year()))
    }

    /// 通过 UUID 获取学年
    pub async fn get_school_year_by_uuid_impl(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<SchoolYear>> {
        let Some(uuid) = parse_uuid(uuid) else {
            return Ok(None);
        };

        let result = SchoolYears::find()
            .filter(Column::Uuid.eq(uuid))
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_school_year()))
    }

    /// 学年及其假期、年级
    pub async fn get_school_year_detail_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<SchoolYearDetail>> {
        let Some(school_year) = self.get_school_year_impl(school_id, id).await? else {
            return Ok(None);
        };

        let breaks = SchoolBreaks::find()
            .filter(SchoolBreakColumn::SchoolYearId.eq(id))
            .order_by_asc(SchoolBreakColumn::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学校假期失败: {e}")))?;

        let grade_levels = GradeLevels::find()
            .filter(GradeLevelColumn::SchoolYearId.eq(id))
            .order_by_asc(GradeLevelColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询年级失败: {e}")))?;

        Ok(Some(SchoolYearDetail {
            school_year,
            breaks: breaks.into_iter().map(|m| m.into_school_break()).collect(),
            grade_levels: grade_levels
                .into_iter()
                .map(|m| m.into_grade_level())
                .collect(),
        }))
    }

    /// 查找同一学校内与范围重叠的学年
    pub async fn find_overlapping_school_year_impl(
        &self,
        school_id: i64,
        range: DateRange,
        exclude_id: Option<i64>,
    ) -> Result<Option<SchoolYear>> {
        let mut select = SchoolYears::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::StartDate.lte(range.end))
            .filter(Column::EndDate.gte(range.start));

        if let Some(exclude_id) = exclude_id {
            select = select.filter(Column::Id.ne(exclude_id));
        }

        let result = select
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询重叠学年失败: {e}")))?;

        Ok(result.map(|m| m.into_school_year()))
    }

    /// 创建学年
    pub async fn create_school_year_impl(
        &self,
        school_id: i64,
        input: SchoolYearInput,
    ) -> Result<SchoolYear> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            school_id: Set(school_id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            days_of_week: Set(input.days_of_week.bits()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("创建学年失败: {e}")))?;

        Ok(result.into_school_year())
    }

    /// 更新学年
    pub async fn update_school_year_impl(
        &self,
        id: i64,
        input: SchoolYearInput,
    ) -> Result<Option<SchoolYear>> {
        let existing = SchoolYears::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学年失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            days_of_week: Set(input.days_of_week.bits()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("更新学年失败: {e}")))?;

        Ok(Some(result.into_school_year()))
    }

    /// 删除学年，假期和年级随之级联删除
    pub async fn delete_school_year_impl(&self, school_id: i64, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        // 记录受影响的课程，删除后清理不再属于任何年级的课程
        let course_ids: Vec<i64> = GradeLevelCourses::find()
            .select_only()
            .column(GradeLevelCourseColumn::CourseId)
            .join(JoinType::InnerJoin, GradeLevelCourseRelation::GradeLevel.def())
            .filter(GradeLevelColumn::SchoolYearId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学年课程失败: {e}")))?;

        let result = SchoolYears::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::SchoolId.eq(school_id))
            .exec(&txn)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除学年失败: {e}")))?;

        if result.rows_affected > 0 {
            Self::delete_orphan_courses(&txn, course_ids).await?;
        }

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};
    use super::*;
    use crate::utils::DaysOfWeek;

    #[tokio::test]
    async fn test_find_overlapping_is_scoped_and_inclusive() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;

        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;

        // 共享最后一天
        let touching = DateRange::new(date(2025, 6, 1), date(2026, 6, 1));
        let found = storage
            .find_overlapping_school_year_impl(school.id, touching, None)
            .await
            .unwrap();
        assert_eq!(found.map(|y| y.id), Some(year.id));

        let after = DateRange::new(date(2025, 6, 2), date(2026, 6, 1));
        assert!(
            storage
                .find_overlapping_school_year_impl(school.id, after, None)
                .await
                .unwrap()
                .is_none()
        );

        // 其他学校不可见
        assert!(
            storage
                .find_overlapping_school_year_impl(other.id, year.range(), None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_editing_never_overlaps_itself() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;

        let widened = DateRange::new(date(2024, 8, 1), date(2025, 7, 1));
        assert!(
            storage
                .find_overlapping_school_year_impl(school.id, widened, Some(year.id))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_overlap_returns_lowest_id() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let first =
            fixtures::school_year(&storage, school.id, date(2023, 9, 1), date(2024, 6, 1)).await;
        fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;

        let spanning = DateRange::new(date(2023, 1, 1), date(2026, 1, 1));
        let found = storage
            .find_overlapping_school_year_impl(school.id, spanning, None)
            .await
            .unwrap();
        assert_eq!(found.map(|y| y.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_lookup_by_uuid_is_scoped() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;

        let uuid = year.uuid.to_string();
        assert!(
            storage
                .get_school_year_by_uuid_impl(school.id, &uuid)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            storage
                .get_school_year_by_uuid_impl(other.id, &uuid)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .get_school_year_by_uuid_impl(school.id, "garbage")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;

        let updated = storage
            .update_school_year_impl(
                year.id,
                SchoolYearInput {
                    start_date: date(2024, 8, 15),
                    end_date: date(2025, 5, 30),
                    days_of_week: DaysOfWeek::MONDAY,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.start_date, date(2024, 8, 15));
        assert_eq!(updated.days_of_week, DaysOfWeek::MONDAY);
        assert_eq!(updated.uuid, year.uuid);

        assert!(!storage.delete_school_year_impl(other.id, year.id).await.unwrap());
        assert!(storage.delete_school_year_impl(school.id, year.id).await.unwrap());
        assert!(
            storage
                .get_school_year_impl(school.id, year.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_to_grade_levels_and_orphan_courses() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let next =
            fixtures::school_year(&storage, school.id, date(2025, 9, 1), date(2026, 6, 1)).await;
        let first_grade = fixtures::grade_level(&storage, year.id, "First Grade").await;
        let second_grade = fixtures::grade_level(&storage, next.id, "Second Grade").await;

        let only_here = fixtures::course(&storage, "Phonics", &[first_grade.id]).await;
        let shared =
            fixtures::course(&storage, "Math", &[first_grade.id, second_grade.id]).await;

        assert!(storage.delete_school_year_impl(school.id, year.id).await.unwrap());

        assert!(
            storage
                .get_grade_level_impl(school.id, first_grade.id)
                .await
                .unwrap()
                .is_none()
        );
        use crate::entity::courses::Entity as Courses;
        let orphan = Courses::find_by_id(only_here.id).one(&storage.db).await.unwrap();
        assert!(orphan.is_none());
        let uuid = shared.uuid.to_string();
        assert!(storage.get_course_by_uuid_impl(school.id, &uuid).await.unwrap().is_some());
    }
}
