//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod feed;
mod follows;
mod groups;
mod health;
mod posts;
mod profiles;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;
use uuid::Uuid;

use murmur_core::domain::{Comment, Post, User};
use murmur_shared::dto::{CommentResponse, PostResponse, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        .route("/", web::get().to(feed::index))
        .route("/follow/", web::get().to(feed::follow_index))
        .route("/create/", web::get().to(posts::create_form))
        .route("/create/", web::post().to(posts::create))
        .route("/groups/{slug}/", web::get().to(groups::group_posts))
        .route("/profile/{username}/", web::get().to(profiles::profile))
        .route("/profile/{username}/follow/", web::get().to(follows::follow))
        .route(
            "/profile/{username}/unfollow/",
            web::get().to(follows::unfollow),
        )
        .route("/posts/{id}/", web::get().to(posts::detail))
        .route("/posts/{id}/edit/", web::get().to(posts::edit_form))
        .route("/posts/{id}/edit/", web::post().to(posts::edit))
        .route("/posts/{id}/delete/", web::post().to(posts::delete))
        .route("/posts/{id}/comment/", web::post().to(comments::add_comment));
}

/// `?page=` query parameter, passed through raw to the pagination helper.
#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    pub page: Option<String>,
}

/// 302 redirect to the given location.
pub(crate) fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Parse a post id from the path; garbage ids behave like unknown ids.
pub(crate) fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Post {} not found", raw)))
}

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

/// Resolve author usernames and group slugs for a post listing.
///
/// Lookups are memoized per call so a page of posts by one author costs one
/// user lookup, not ten.
pub(crate) async fn render_posts(
    state: &AppState,
    posts: Vec<Post>,
) -> AppResult<Vec<PostResponse>> {
    let mut usernames: HashMap<Uuid, String> = HashMap::new();
    let mut slugs: HashMap<Uuid, Option<String>> = HashMap::new();
    let mut rendered = Vec::with_capacity(posts.len());

    for post in posts {
        let author = match usernames.get(&post.author_id) {
            Some(name) => name.clone(),
            None => {
                let name = state
                    .users
                    .find_by_id(post.author_id)
                    .await?
                    .map(|u| u.username)
                    .unwrap_or_else(|| "unknown".to_string());
                usernames.insert(post.author_id, name.clone());
                name
            }
        };

        let group = match post.group_id {
            Some(group_id) => match slugs.get(&group_id) {
                Some(slug) => slug.clone(),
                None => {
                    let slug = state.groups.find_by_id(group_id).await?.map(|g| g.slug);
                    slugs.insert(group_id, slug.clone());
                    slug
                }
            },
            None => None,
        };

        rendered.push(PostResponse {
            id: post.id.to_string(),
            text: post.text,
            pub_date: post.pub_date.to_rfc3339(),
            author,
            group,
            image: post.image,
        });
    }

    Ok(rendered)
}

pub(crate) async fn render_post(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let mut rendered = render_posts(state, vec![post]).await?;
    rendered
        .pop()
        .ok_or_else(|| AppError::Internal("empty post rendering".to_string()))
}

pub(crate) async fn render_comments(
    state: &AppState,
    comments: Vec<Comment>,
) -> AppResult<Vec<CommentResponse>> {
    let mut usernames: HashMap<Uuid, String> = HashMap::new();
    let mut rendered = Vec::with_capacity(comments.len());

    for comment in comments {
        let author = match usernames.get(&comment.author_id) {
            Some(name) => name.clone(),
            None => {
                let name = state
                    .users
                    .find_by_id(comment.author_id)
                    .await?
                    .map(|u| u.username)
                    .unwrap_or_else(|| "unknown".to_string());
                usernames.insert(comment.author_id, name.clone());
                name
            }
        };

        rendered.push(CommentResponse {
            id: comment.id.to_string(),
            text: comment.text,
            created: comment.created.to_rfc3339(),
            author,
        });
    }

    Ok(rendered)
}
