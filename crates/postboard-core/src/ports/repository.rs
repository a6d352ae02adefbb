use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostChanges, User};
use crate::error::RepoError;

/// Generic repository trait for lookups and removal by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Insert a user. `RepoError::Constraint` if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Posts ordered by id, one page at a time.
    async fn list(&self, page: PageRequest) -> Result<Vec<Post>, RepoError>;

    /// Replace title, content and published. `Ok(None)` if the id is absent.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError>;
}

/// Largest limit or offset a SQL backend can bind (`BIGINT`).
pub const MAX_PAGE_BOUND: u64 = i64::MAX as u64;

/// A window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    /// Both bounds are capped at [`MAX_PAGE_BOUND`].
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.min(MAX_PAGE_BOUND),
            offset: offset.min(MAX_PAGE_BOUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_keeps_small_bounds() {
        let page = PageRequest::new(10, 20);
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn test_page_request_caps_unbindable_offset() {
        let page = PageRequest::new(u64::MAX, u64::MAX);
        assert_eq!(page.limit, i64::MAX as u64);
        assert_eq!(page.offset, i64::MAX as u64);
    }
}
