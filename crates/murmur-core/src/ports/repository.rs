use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Follow, Group, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Relational cascades are the storage layer's responsibility: deleting a
    /// user removes their posts, comments and follows; deleting a post removes
    /// its comments; deleting a group detaches its posts (`group_id = None`).
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;
}

/// Post repository. All listings are ordered newest-first by `pub_date`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, for the home feed.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts by any of the given authors, for the followed-authors feed.
    async fn list_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository. Listings are ordered newest-first by `created`.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Follow repository.
///
/// There is no update operation for follows. The `(user_id, author_id)`
/// uniqueness is enforced here as the authoritative guard; `insert` on an
/// existing pair fails with [`RepoError::Constraint`].
#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;

    async fn insert(&self, follow: Follow) -> Result<Follow, RepoError>;

    /// Remove the relation; no-op if it does not exist.
    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError>;

    /// IDs of all authors the given user follows.
    async fn followed_author_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Total number of follow relations. Used by tests and admin tooling.
    async fn count(&self) -> Result<usize, RepoError>;
}
