use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Follow entity - a directed subscription from `user_id` to `author_id`.
///
/// The pair `(user_id, author_id)` is unique; there is no update operation,
/// follows are only created and destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    /// The follower.
    pub user_id: Uuid,
    /// The followed author.
    pub author_id: Uuid,
}

impl Follow {
    pub fn new(user_id: Uuid, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            author_id,
        }
    }
}
