//! In-memory repositories - used when no relational store is wired in (tests, demos).
//!
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, NewUser, Post, PostChanges, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PageRequest, PostRepository, UserRepository};

/// Rows keyed by id plus the next id to hand out.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory user store with email uniqueness.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|u| u.email == new_user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        let user = User {
            id: table.allocate_id(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory post store.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let post = Post {
            id: table.allocate_id(),
            owner_id: new_post.owner_id,
            title: new_post.title,
            content: new_post.content,
            published: new_post.published,
            created_at: Utc::now(),
        };
        table.rows.insert(post.id, post.clone());

        Ok(post)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut table = self.table.write().await;

        Ok(table.rows.get_mut(&id).map(|post| {
            post.apply(changes);
            post.clone()
        }))
    }
}
