//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use postboard_core::domain::{NewPost, NewUser, Post, PostChanges, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{PageRequest, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_email;
use super::postgres_base::{PostgresBaseRepository, read_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = self.insert(user::ActiveModel::from(new_user)).await?;
        tracing::debug!(user_id = model.id, "User inserted");
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(read_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = self.insert(post::ActiveModel::from(new_post)).await?;
        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(self.db.as_ref())
            .await
            .map_err(read_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        // Dropping `txn` without commit rolls back.
        let txn = self.db.begin().await.map_err(read_error)?;

        let Some(existing) = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(read_error)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.title = Set(changes.title);
        active.content = Set(changes.content);
        active.published = Set(changes.published);

        let updated = active.update(&txn).await.map_err(write_error)?;
        txn.commit().await.map_err(write_error)?;

        Ok(Some(updated.into()))
    }
}
