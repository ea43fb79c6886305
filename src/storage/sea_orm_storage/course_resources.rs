//! 课程资源存储操作

use super::SeaOrmStorage;
use crate::entity::course_resources::{ActiveModel, Column, Entity as CourseResources};
use crate::errors::{HomeschoolError, Result};
use crate::models::course_resources::entities::CourseResource;
use crate::utils::parse_uuid;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出课程资源
    pub async fn list_course_resources_impl(&self, course_id: i64) -> Result<Vec<CourseResource>> {
        let resources = CourseResources::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程资源失败: {e}")))?;

        Ok(resources
            .into_iter()
            .map(|m| m.into_course_resource())
            .collect())
    }

    /// 通过 UUID 获取属于学校的资源
    pub async fn get_course_resource_by_uuid_impl(
        &self,
        school_id: i64,
        uuid: &str,
    ) -> Result<Option<CourseResource>> {
        let Some(uuid) = parse_uuid(uuid) else {
            return Ok(None);
        };

        let result = CourseResources::find()
            .filter(Column::Uuid.eq(uuid))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程资源失败: {e}")))?;

        match result {
            Some(resource) if self.course_belongs_to_impl(resource.course_id, school_id).await? => {
                Ok(Some(resource.into_course_resource()))
            }
            _ => Ok(None),
        }
    }

    /// 创建资源
    pub async fn create_course_resource_impl(
        &self,
        course_id: i64,
        title: String,
        details: String,
    ) -> Result<CourseResource> {
        let model = ActiveModel {
            uuid: Set(uuid::Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(title),
            details: Set(details),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("创建课程资源失败: {e}")))?;

        Ok(result.into_course_resource())
    }

    /// 更新资源
    pub async fn update_course_resource_impl(
        &self,
        id: i64,
        title: String,
        details: String,
    ) -> Result<Option<CourseResource>> {
        let existing = CourseResources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询课程资源失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            title: Set(title),
            details: Set(details),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("更新课程资源失败: {e}")))?;

        Ok(Some(result.into_course_resource()))
    }

    /// 删除资源
    pub async fn delete_course_resource_impl(&self, id: i64) -> Result<bool> {
        let result = CourseResources::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("删除课程资源失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, fixtures::date, test_storage};

    #[tokio::test]
    async fn test_resources_follow_course_lifecycle() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;
        let other = fixtures::school(&storage, "bob").await;
        let year =
            fixtures::school_year(&storage, school.id, date(2024, 9, 1), date(2025, 6, 1)).await;
        let grade = fixtures::grade_level(&storage, year.id, "Third Grade").await;
        let course = fixtures::course(&storage, "Math", &[grade.id]).await;

        let resource = storage
            .create_course_resource_impl(
                course.id,
                "Singapore Math 3A".to_string(),
                "Textbook and workbook".to_string(),
            )
            .await
            .unwrap();

        let uuid = resource.uuid.to_string();
        assert!(
            storage
                .get_course_resource_by_uuid_impl(other.id, &uuid)
                .await
                .unwrap()
                .is_none()
        );

        let updated = storage
            .update_course_resource_impl(resource.id, "Singapore Math 3B".to_string(), String::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Singapore Math 3B");
        assert_eq!(updated.details, "");

        // 删除课程后资源级联删除
        assert!(storage.delete_course_impl(course.id).await.unwrap());
        assert!(storage.list_course_resources_impl(course.id).await.unwrap().is_empty());
        assert!(
            storage
                .get_course_resource_by_uuid_impl(school.id, &uuid)
                .await
                .unwrap()
                .is_none()
        );
    }
}
