//! In-memory storage backend.
//!
//! Used as fallback when Postgres is not configured, and by route tests.
//! All tables live behind one async RwLock so read-then-write sequences
//! (uniqueness checks, cascades) are atomic per operation, mirroring the
//! transactional guarantees the Postgres schema provides through constraints
//! and FK actions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use murmur_core::domain::{Comment, Follow, Group, Post, User};
use murmur_core::error::RepoError;
use murmur_core::ports::{
    BaseRepository, CommentRepository, FollowRepository, GroupRepository, PostRepository,
    UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    follows: Vec<Follow>,
}

/// Shared in-memory tables. Each repository holds an `Arc` to the same store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

pub struct MemoryUserRepository(pub Arc<MemoryStore>);
pub struct MemoryGroupRepository(pub Arc<MemoryStore>);
pub struct MemoryPostRepository(pub Arc<MemoryStore>);
pub struct MemoryCommentRepository(pub Arc<MemoryStore>);
pub struct MemoryFollowRepository(pub Arc<MemoryStore>);

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    posts
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.0.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;
        let taken = tables.users.values().any(|u| {
            u.id != user.id && (u.username == user.username || u.email == user.email)
        });
        if taken {
            return Err(RepoError::Constraint(
                "username or email already taken".to_string(),
            ));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        // Cascades: the user's posts, their comments, comments they authored,
        // and follows on either side all go with them.
        let removed_posts: HashSet<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|_, p| p.author_id != id);
        tables
            .comments
            .retain(|_, c| c.author_id != id && !removed_posts.contains(&c.post_id));
        tables
            .follows
            .retain(|f| f.user_id != id && f.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for MemoryGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.0.tables.read().await.groups.get(&id).cloned())
    }

    async fn save(&self, group: Group) -> Result<Group, RepoError> {
        let mut tables = self.0.tables.write().await;
        let taken = tables
            .groups
            .values()
            .any(|g| g.id != group.id && g.slug == group.slug);
        if taken {
            return Err(RepoError::Constraint("slug already taken".to_string()));
        }
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.groups.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // Posts survive their group, detached.
        for post in tables.posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables.groups.values().find(|g| g.slug == slug).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(newest_first(tables.posts.values().cloned().collect()))
    }

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(newest_first(
            tables
                .posts
                .values()
                .filter(|p| p.group_id == Some(group_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(newest_first(
            tables
                .posts
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let wanted: HashSet<Uuid> = author_ids.iter().copied().collect();
        let tables = self.0.tables.read().await;
        Ok(newest_first(
            tables
                .posts
                .values()
                .filter(|p| wanted.contains(&p.author_id))
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for MemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.0.tables.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.0.tables.write().await;
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.comments.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.0.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(comments)
    }
}

#[async_trait]
impl FollowRepository for MemoryFollowRepository {
    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .any(|f| f.user_id == user_id && f.author_id == author_id))
    }

    async fn insert(&self, follow: Follow) -> Result<Follow, RepoError> {
        // Check-and-insert under one write lock: the authoritative guard
        // against concurrent duplicate follows.
        let mut tables = self.0.tables.write().await;
        let duplicate = tables
            .follows
            .iter()
            .any(|f| f.user_id == follow.user_id && f.author_id == follow.author_id);
        if duplicate {
            return Err(RepoError::Constraint(
                "follow relation already exists".to_string(),
            ));
        }
        tables.follows.push(follow.clone());
        Ok(follow)
    }

    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        tables
            .follows
            .retain(|f| !(f.user_id == user_id && f.author_id == author_id));
        Ok(())
    }

    async fn followed_author_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|f| f.user_id == user_id)
            .map(|f| f.author_id)
            .collect())
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Ok(self.0.tables.read().await.follows.len())
    }
}
