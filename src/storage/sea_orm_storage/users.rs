//! 用户与学校存储操作

use super::SeaOrmStorage;
use crate::entity::schools::{
    ActiveModel as SchoolActiveModel, Column as SchoolColumn, Entity as Schools,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{HomeschoolError, Result};
use crate::models::{
    schools::entities::School,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建管理员，并在同一事务中创建其学校
    pub async fn create_user_with_school_impl(
        &self,
        req: CreateUserRequest,
    ) -> Result<(User, School)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("开启事务失败: {e}")))?;

        let user = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HomeschoolError::database_operation(format!("创建用户失败: {e}")))?;

        let school = SchoolActiveModel {
            admin_id: Set(user.id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| HomeschoolError::database_operation(format!("创建学校失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((user.into_user(), school.into_school()))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                HomeschoolError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 获取管理员的学校
    pub async fn get_school_by_admin_impl(&self, admin_id: i64) -> Result<Option<School>> {
        let result = Schools::find()
            .filter(SchoolColumn::AdminId.eq(admin_id))
            .one(&self.db)
            .await
            .map_err(|e| HomeschoolError::database_operation(format!("查询学校失败: {e}")))?;

        Ok(result.map(|m| m.into_school()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, test_storage};
    use super::*;

    #[tokio::test]
    async fn test_register_creates_school() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "alice").await;

        let user = storage
            .get_user_by_username_or_email_impl("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(school.admin_id, user.id);

        let found = storage.get_school_by_admin_impl(user.id).await.unwrap();
        assert_eq!(found, Some(school));
    }

    #[tokio::test]
    async fn test_duplicate_username_rolls_back() {
        let storage = test_storage().await;
        fixtures::school(&storage, "alice").await;

        let result = storage
            .create_user_with_school_impl(CreateUserRequest {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                password: "hash".to_string(),
                display_name: None,
            })
            .await;
        assert!(result.is_err());
        assert!(
            storage
                .get_user_by_email_impl("other@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_user_keeps_unset_fields() {
        let storage = test_storage().await;
        fixtures::school(&storage, "bob").await;
        let user = storage.get_user_by_username_impl("bob").await.unwrap().unwrap();

        let updated = storage
            .update_user_impl(
                user.id,
                UpdateUserRequest {
                    display_name: Some("Bob".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("Bob"));
        assert_eq!(updated.email, "bob@example.com");

        assert!(storage.update_user_impl(999, UpdateUserRequest::default()).await.unwrap().is_none());
    }
}
