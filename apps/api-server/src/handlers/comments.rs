//! Comment handler.

use actix_web::{HttpResponse, web};

use murmur_core::domain::Comment;
use murmur_core::forms::CommentForm;

use super::{parse_post_id, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /posts/{id}/comment/
///
/// Validates, attaches the acting user as author and the addressed post,
/// persists, and redirects to the post detail page.
pub async fn add_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let form = body.into_inner();
    form.validate().map_err(AppError::Validation)?;

    let comment = Comment::new(post.id, identity.user_id, form.text);
    state.comments.save(comment).await?;

    Ok(redirect(format!("/posts/{}/", post.id)))
}
