//! Feed handlers: the global home feed and the followed-authors feed.

use actix_web::{HttpResponse, http::header::ContentType, web};

use murmur_shared::{POSTS_PER_PAGE, Page};

use super::{PageQuery, render_posts};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /
///
/// All posts, newest-first, paginated. The rendered page is cached whole for
/// the configured TTL; within that window readers get the stored body even if
/// posts changed underneath.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let raw_page = query.page.as_deref();

    if let Some(body) = state.home_feed.get(raw_page).await {
        return Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(body));
    }

    let posts = state.posts.list_all().await?;
    let rendered = render_posts(&state, posts).await?;
    let page = Page::paginate(rendered, raw_page, POSTS_PER_PAGE);

    let body = serde_json::to_string(&page).map_err(|e| AppError::Internal(e.to_string()))?;
    state.home_feed.store(page.number, &body).await;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// GET /follow/
///
/// Posts by authors the acting user follows, newest-first, paginated.
pub async fn follow_index(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let author_ids = state.follows.followed_author_ids(identity.user_id).await?;
    let posts = state.posts.list_by_authors(&author_ids).await?;
    let rendered = render_posts(&state, posts).await?;
    let page = Page::paginate(rendered, query.page.as_deref(), POSTS_PER_PAGE);

    Ok(HttpResponse::Ok().json(page))
}
