//! Post handlers: detail, create, edit, delete.

use actix_web::{HttpResponse, web};

use murmur_core::domain::Post;
use murmur_core::forms::PostForm;
use murmur_shared::dto::{PostDetailResponse, PostFormResponse};

use super::{parse_post_id, redirect, render_comments, render_post};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn find_post(state: &AppState, raw_id: &str) -> AppResult<Post> {
    let id = parse_post_id(raw_id)?;
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
}

/// Field validation plus the group existence check: a dangling group id is a
/// failed choice, not a missing page.
async fn validate_form(state: &AppState, form: &PostForm) -> AppResult<()> {
    let mut errors = form.validate().err().unwrap_or_default();
    if let Some(group_id) = form.group {
        if state.groups.find_by_id(group_id).await?.is_none() {
            errors.push("group: select a valid choice".to_string());
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /posts/{id}/
pub async fn detail(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post = find_post(&state, &path).await?;
    let comments = state.comments.list_by_post(post.id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        comments: render_comments(&state, comments).await?,
        post: render_post(&state, post).await?,
    }))
}

/// GET /create/ - a blank post form.
pub async fn create_form(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(PostFormResponse {
        text: String::new(),
        group: None,
        image: None,
    }))
}

/// POST /create/
///
/// Validates, attaches the acting user as author, persists, and redirects to
/// that author's profile.
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    validate_form(&state, &form).await?;

    let post = Post::new(identity.user_id, form.text, form.group, form.image);
    state.posts.save(post).await?;

    tracing::info!(author = %identity.username, "Post created");
    Ok(redirect(format!("/profile/{}/", identity.username)))
}

/// GET /posts/{id}/edit/ - the form prefilled from the post, author only.
pub async fn edit_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, &path).await?;
    if post.author_id != identity.user_id {
        return Ok(redirect(format!("/posts/{}/", post.id)));
    }

    Ok(HttpResponse::Ok().json(PostFormResponse {
        text: post.text,
        group: post.group_id.map(|id| id.to_string()),
        image: post.image,
    }))
}

/// POST /posts/{id}/edit/
///
/// Author only; anyone else is silently redirected to the detail page. The
/// post keeps its id, author and publication timestamp.
pub async fn edit(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let mut post = find_post(&state, &path).await?;
    if post.author_id != identity.user_id {
        return Ok(redirect(format!("/posts/{}/", post.id)));
    }

    let form = body.into_inner();
    validate_form(&state, &form).await?;

    post.text = form.text;
    post.group_id = form.group;
    post.image = form.image;
    let post = state.posts.save(post).await?;

    Ok(redirect(format!("/posts/{}/", post.id)))
}

/// POST /posts/{id}/delete/
///
/// Author only; a non-author request is a silent no-op. Either way the
/// response redirects to the acting user's profile.
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, &path).await?;
    if post.author_id == identity.user_id {
        state.posts.delete(post.id).await?;
        tracing::info!(author = %identity.username, post_id = %post.id, "Post deleted");
    }

    Ok(redirect(format!("/profile/{}/", identity.username)))
}
