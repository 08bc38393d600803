//! Follow/unfollow handlers.

use actix_web::{HttpResponse, web};

use murmur_core::domain::Follow;
use murmur_core::error::RepoError;

use super::redirect;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /profile/{username}/follow/
///
/// No-op when the target is the acting user or the relation already exists;
/// redirects to the target's profile either way.
pub async fn follow(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

    if author.id != identity.user_id && !state.follows.exists(identity.user_id, author.id).await? {
        match state
            .follows
            .insert(Follow::new(identity.user_id, author.id))
            .await
        {
            Ok(_) => {
                tracing::info!(follower = %identity.username, author = %author.username, "Followed");
            }
            // Lost a race against a concurrent identical follow; the unique
            // constraint held, so the outcome is the same.
            Err(RepoError::Constraint(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(redirect(format!("/profile/{}/", author.username)))
}

/// GET /profile/{username}/unfollow/
///
/// No-op when the target is the acting user or the relation does not exist;
/// redirects to the target's profile either way.
pub async fn unfollow(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

    if author.id != identity.user_id {
        state.follows.remove(identity.user_id, author.id).await?;
    }

    Ok(redirect(format!("/profile/{}/", author.username)))
}
