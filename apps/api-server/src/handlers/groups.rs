//! Group feed handler.

use actix_web::{HttpResponse, web};

use murmur_shared::dto::{GroupFeedResponse, GroupResponse};
use murmur_shared::{POSTS_PER_PAGE, Page};

use super::{PageQuery, render_posts};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /groups/{slug}/
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group {} not found", slug)))?;

    let posts = state.posts.list_by_group(group.id).await?;
    let rendered = render_posts(&state, posts).await?;
    let page = Page::paginate(rendered, query.page.as_deref(), POSTS_PER_PAGE);

    Ok(HttpResponse::Ok().json(GroupFeedResponse {
        group: GroupResponse {
            title: group.title,
            slug: group.slug,
            description: group.description,
        },
        page,
    }))
}
