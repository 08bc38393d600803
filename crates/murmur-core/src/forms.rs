//! Form validation - user-submitted field sets for posts and comments.
//!
//! Forms validate field-level constraints only. They never set authorship;
//! the handler layer attaches the acting user before persisting.

use serde::Deserialize;
use uuid::Uuid;

/// Post submission form: required text, optional group, optional image.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

impl PostForm {
    /// Validate field-level constraints, returning one message per failing field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.text.trim().is_empty() {
            errors.push("text: this field is required".to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Comment submission form: required text.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if self.text.trim().is_empty() {
            return Err(vec!["text: this field is required".to_string()]);
        }
        Ok(())
    }
}
