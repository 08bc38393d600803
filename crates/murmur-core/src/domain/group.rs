use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a named category posts can optionally belong to.
///
/// The slug is the group's URL identity and must be unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    pub fn new(title: String, slug: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }
}
