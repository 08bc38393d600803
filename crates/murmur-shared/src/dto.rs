//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

/// A post as rendered in feeds and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub text: String,
    pub pub_date: String,
    /// Author's username.
    pub author: String,
    /// Slug of the group the post belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A group's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A comment as rendered on a post detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub created: String,
    pub author: String,
}

/// Group feed: the group plus one page of its posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    #[serde(flatten)]
    pub page: Page<PostResponse>,
}

/// Author profile: the author, follow status for the viewer, and their posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    /// Whether the authenticated viewer follows this author.
    /// Absent for anonymous viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    #[serde(flatten)]
    pub page: Page<PostResponse>,
}

/// Post detail: the post and its comments, newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Post form body, blank for the create page, prefilled for the edit page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub text: String,
    pub group: Option<String>,
    pub image: Option<String>,
}
