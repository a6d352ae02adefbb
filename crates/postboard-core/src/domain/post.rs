use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a titled piece of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    /// The user whose token created the post.
    pub owner_id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner_id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
}

/// Full replacement of the mutable fields of a post.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl Post {
    /// Apply a full replacement in place. Id, owner and timestamp are immutable.
    pub fn apply(&mut self, changes: PostChanges) {
        self.title = changes.title;
        self.content = changes.content;
        self.published = changes.published;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_identity() {
        let created_at = Utc::now();
        let mut post = Post {
            id: 7,
            owner_id: 3,
            title: "old".to_string(),
            content: "old body".to_string(),
            published: true,
            created_at,
        };

        post.apply(PostChanges {
            title: "new".to_string(),
            content: "new body".to_string(),
            published: false,
        });

        assert_eq!(post.id, 7);
        assert_eq!(post.owner_id, 3);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.title, "new");
        assert_eq!(post.content, "new body");
        assert!(!post.published);
    }
}
