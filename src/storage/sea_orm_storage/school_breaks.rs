//! 学校假期存储操作

use super::SeaOrmStorage;
use crate::entity::school_breaks::{ActiveModel, Column, Entity as SchoolBreaks, Relation};
use crate::entity::school_years::{Column as SchoolYearColumn, Entity as SchoolYears};
use crate::errors::{HomeschoolError, Result};
use crate::models::school_breaks::entities::{SchoolBreak, SchoolBreakInput};
use crate::utils::DateRange;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 列出学校的假期，可按学年筛选
    pub async fn list_school_breaks_impl(
        &self,
        school_id: i64,
        school_year_id: Option<i64>,
    ) -> Result<Vec<SchoolBreak>> {
        let mut select = SchoolBreaks::find()
            .join(JoinType::InnerJoin, Relation::SchoolYear.def())
            .filter(SchoolYearColumn::SchoolId.eq(school_id));

        if let Some(school_year_id) = school_year_id {
            select = select.filter(Column::SchoolYearId.eq(school_year_id));
        }

        let breaks = select
            .order_by_asc(Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学校假期失败: {e}")))?;

        Ok(breaks.into_iter().map(|m| m.into_school_break()).collect())
    }

    /// 通过 ID 获取假期
    pub async fn get_school_break_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<SchoolBreak>> {
        let result = SchoolBreaks::find_by_id(id)
            .join(JoinType::InnerJoin, Relation::SchoolYear.def())
            .filter(SchoolYearColumn::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学校假期失败: {e}")))?;

        Ok(result.map(|m| m.into_school_break()))
    }

    /// 查找同一学年内与范围重叠的假期
    pub async fn find_overlapping_school_break_impl(
        &self,
        school_year_id: i64,
        range: DateRange,
        exclude_id: Option<i64>,
    ) -> Result<Option<SchoolBreak>> {
        let mut select = SchoolBreaks::find()
            .filter(Column::SchoolYearId.eq(school_year_id))
            .filter(Column::StartDate.lte(range.end))
            .filter(Column::EndDate.gte(range.start));

        if let Some(exclude_id) = exclude_id {
            select = select.filter(Column::Id.ne(exclude_id));
        }

        let result = select
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询重叠假期失败: {e}")))?;

        Ok(result.map(|m| m.into_school_break()))
    }

    /// 创建假期
    pub async fn create_school_break_impl(
        &self,
        school_year_id: i64,
        input: SchoolBreakInput,
    ) -> Result<SchoolBreak> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            school_year_id: Set(school_year_id),
            description: Set(input.description),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("创建学校假期失败: {e}")))?;

        Ok(result.into_school_break())
    }

    /// 更新假期，可移动到另一个学年
    pub async fn update_school_break_impl(
        &self,
        id: i64,
        school_year_id: i64,
        input: SchoolBreakInput,
    ) -> Result<Option<SchoolBreak>> {
        let existing = SchoolBreaks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学校假期失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            school_year_id: Set(school_year_id),
            description: Set(input.description),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("更新学校假期失败: {e}")))?;

        Ok(Some(result.into_school_break()))
    }

    /// 删除假期
    pub async fn delete_school_break_impl(&self, school_id: i64, id: i64) -> Result<bool> {
        let owned_years = SchoolYears::find()
            .select_only()
            .column(SchoolYearColumn::Id)
            .filter(SchoolYearColumn::SchoolId.eq(school_id))
            .into_query();

        let result = SchoolBreaks::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::SchoolYearId.in_subquery(owned_years))
            .exec(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除学校假期失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};
    use super::*;

    fn input(start: chrono::NaiveDate, end: chrono::NaiveDate) -> SchoolBreakInput {
        SchoolBreakInput {
            description: "Winter break".to_string(),
            start_date: start,
            end_date: end,
        }
    }

    #[tokio::test]
    async fn test_overlapping_breaks_in_same_year() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;

        let winter = storage
            .create_school_break_impl(year.id, input(date(2024, 12, 20), date(2024, 12, 31)))
            .await
            .unwrap();

        let candidate = DateRange::new(date(2024, 12, 25), date(2025, 1, 2));
        let found = storage
            .find_overlapping_school_break_impl(year.id, candidate, None)
            .await
            .unwrap();
        assert_eq!(found.map(|b| b.id), Some(winter.id));

        let thanksgiving = DateRange::new(date(2024, 11, 1), date(2024, 11, 7));
        assert!(
            storage
                .find_overlapping_school_break_impl(year.id, thanksgiving, None)
                .await
                .unwrap()
                .is_none()
        );

        // 编辑时排除自身
        assert!(
            storage
                .find_overlapping_school_break_impl(year.id, candidate, Some(winter.id))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_breaks_in_other_years_do_not_overlap() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let other_year =
            fixtures::school_year(&storage, school.id, date(2025, 9, 1), date(2026, 6, 1)).await;

        storage
            .create_school_break_impl(year.id, input(date(2024, 12, 20), date(2024, 12, 31)))
            .await
            .unwrap();

        let same_dates = DateRange::new(date(2024, 12, 20), date(2024, 12, 31));
        assert!(
            storage
                .find_overlapping_school_break_impl(other_year.id, same_dates, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_get_and_delete_are_scoped() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let school_break = storage
            .create_school_break_impl(year.id, input(date(2024, 11, 25), date(2024, 11, 29)))
            .await
            .unwrap();

        assert_eq!(
            storage
                .list_school_breaks_impl(school.id, Some(year.id))
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(storage.list_school_breaks_impl(other.id, None).await.unwrap().is_empty());
        assert!(
            storage
                .get_school_break_impl(other.id, school_break.id)
                .await
                .unwrap()
                .is_none()
        );

        assert!(!storage.delete_school_break_impl(other.id, school_break.id).await.unwrap());
        assert!(storage.delete_school_break_impl(school.id, school_break.id).await.unwrap());
        assert!(storage.list_school_breaks_impl(school.id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_break() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let school_break = storage
            .create_school_break_impl(year.id, input(date(2024, 11, 25), date(2024, 11, 29)))
            .await
            .unwrap();

        let updated = storage
            .update_school_break_impl(
                school_break.id,
                year.id,
                SchoolBreakInput {
                    description: "Thanksgiving".to_string(),
                    start_date: date(2024, 11, 27),
                    end_date: date(2024, 11, 29),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "Thanksgiving");
        assert_eq!(updated.start_date, date(2024, 11, 27));

        assert!(
            storage
                .update_school_break_impl(999, year.id, input(date(2024, 1, 1), date(2024, 1, 2)))
                .await
                .unwrap()
                .is_none()
        );
    }
}
