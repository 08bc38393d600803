//! Author profile handler.

use actix_web::{HttpResponse, web};

use murmur_shared::dto::ProfileResponse;
use murmur_shared::{POSTS_PER_PAGE, Page};

use super::{PageQuery, render_posts, user_response};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /profile/{username}/
///
/// The author's posts, newest-first, paginated. For an authenticated viewer
/// the response also reports whether they follow this author.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

    let posts = state.posts.list_by_author(author.id).await?;
    let rendered = render_posts(&state, posts).await?;
    let page = Page::paginate(rendered, query.page.as_deref(), POSTS_PER_PAGE);

    let following = match viewer.0 {
        Some(viewer) => Some(state.follows.exists(viewer.user_id, author.id).await?),
        None => None,
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author: user_response(&author),
        following,
        page,
    }))
}
