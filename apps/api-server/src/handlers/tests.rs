//! Route-level tests over the in-memory state.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::Duration as ChronoDuration;
use uuid::Uuid;

use murmur_core::domain::{Comment, Follow, Group, Post, User};
use murmur_core::ports::{PasswordService, TokenService};
use murmur_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use murmur_infra::clock::ManualClock;

use crate::handlers::configure_routes;
use crate::state::AppState;

struct TestEnv {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    clock: Arc<ManualClock>,
}

impl TestEnv {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let state = AppState::in_memory_with_clock(clock.clone(), Duration::from_secs(20));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        }));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            state,
            tokens,
            passwords,
            clock,
        }
    }

    async fn seed_user(&self, username: &str) -> User {
        self.state
            .users
            .save(User::new(
                username.to_string(),
                format!("{username}@example.com"),
                "hash".to_string(),
            ))
            .await
            .unwrap()
    }

    async fn seed_group(&self, title: &str, slug: &str) -> Group {
        self.state
            .groups
            .save(Group::new(title.to_string(), slug.to_string(), String::new()))
            .await
            .unwrap()
    }

    async fn seed_post(&self, author: &User, text: &str, group: Option<Uuid>) -> Post {
        self.state
            .posts
            .save(Post::new(author.id, text.to_string(), group, None))
            .await
            .unwrap()
    }

    /// Like `seed_post` but with an explicit timestamp offset, for tests that
    /// depend on ordering.
    async fn seed_post_at(&self, author: &User, text: &str, offset_secs: i64) -> Post {
        let mut post = Post::new(author.id, text.to_string(), None, None);
        post.pub_date += ChronoDuration::seconds(offset_secs);
        self.state.posts.save(post).await.unwrap()
    }

    fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        let token = self
            .tokens
            .generate_token(user.id, &user.username, &user.email)
            .unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }
}

macro_rules! app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.state.clone()))
                .app_data(web::Data::new($env.tokens.clone()))
                .app_data(web::Data::new($env.passwords.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

#[actix_web::test]
async fn home_feed_is_newest_first_and_paginated() {
    let env = TestEnv::new();
    let author = env.seed_user("poster").await;
    for i in 0..13 {
        env.seed_post_at(&author, &format!("post-{i}"), i).await;
    }
    let app = app!(&env);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 10);
    assert_eq!(page["items"][0]["text"], "post-12");
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], true);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/?page=2").to_request()).await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 3);
    assert_eq!(page["has_previous"], true);
}

#[actix_web::test]
async fn home_feed_cache_serves_stale_within_ttl() {
    let env = TestEnv::new();
    let author = env.seed_user("poster").await;
    env.seed_post(&author, "first", None).await;
    let app = app!(&env);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["total_items"], 1);

    // A write within the TTL window is not visible
    env.seed_post(&author, "second", None).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["total_items"], 1);

    // Past the TTL the rendering is rebuilt
    env.clock.advance(Duration::from_secs(21));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["total_items"], 2);
}

#[actix_web::test]
async fn home_feed_cache_keys_are_bounded_by_real_pages() {
    let env = TestEnv::new();
    let author = env.seed_user("poster").await;
    env.seed_post(&author, "first", None).await;
    let app = app!(&env);

    // A garbage page value is served page 1 and cached under it
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/?page=bogus-1").to_request(),
    )
    .await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["number"], 1);
    assert_eq!(page["total_items"], 1);

    // Every other invalid value resolves to that same entry; the stale body
    // after a write proves no new entry was minted per value
    env.seed_post(&author, "second", None).await;
    for raw in ["bogus-2", "0", "-3", ""] {
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/?page={raw}"))
                .to_request(),
        )
        .await;
        let page: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(page["total_items"], 1, "page value {raw:?}");
    }

    // An out-of-range numeric page is stored under the page actually served
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/?page=999").to_request(),
    )
    .await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["number"], 1);
    assert_eq!(page["total_items"], 2);
}

#[actix_web::test]
async fn group_feed_contains_only_its_posts() {
    let env = TestEnv::new();
    let author = env.seed_user("poster").await;
    let cats = env.seed_group("Cats", "cats").await;
    env.seed_group("Dogs", "dogs").await;
    env.seed_post(&author, "meow", Some(cats.id)).await;
    let app = app!(&env);

    // In the home feed
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["total_items"], 1);

    // In its own group feed
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/groups/cats/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let feed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(feed["group"]["slug"], "cats");
    assert_eq!(feed["items"].as_array().unwrap().len(), 1);
    assert_eq!(feed["items"][0]["group"], "cats");

    // Never in another group's feed
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/groups/dogs/").to_request(),
    )
    .await;
    let feed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(feed["items"].as_array().unwrap().len(), 0);

    // Unknown slug is a 404
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/groups/birds/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn profile_reports_follow_status_for_authenticated_viewers() {
    let env = TestEnv::new();
    let author = env.seed_user("author").await;
    let viewer = env.seed_user("viewer").await;
    env.seed_post(&author, "hello", None).await;
    let app = app!(&env);

    // Anonymous viewers get no follow status
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/profile/author/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["author"]["username"], "author");
    assert!(profile.get("following").is_none());

    // Authenticated, not yet following
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/")
            .insert_header(env.bearer(&viewer))
            .to_request(),
    )
    .await;
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["following"], false);

    env.state
        .follows
        .insert(Follow::new(viewer.id, author.id))
        .await
        .unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/")
            .insert_header(env.bearer(&viewer))
            .to_request(),
    )
    .await;
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["following"], true);

    // Unknown username is a 404
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/profile/nobody/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn post_detail_shows_comments_newest_first() {
    let env = TestEnv::new();
    let author = env.seed_user("author").await;
    let post = env.seed_post(&author, "hello", None).await;

    let mut old = Comment::new(post.id, author.id, "older".to_string());
    old.created -= ChronoDuration::seconds(10);
    env.state.comments.save(old).await.unwrap();
    env.state
        .comments
        .save(Comment::new(post.id, author.id, "newer".to_string()))
        .await
        .unwrap();

    let app = app!(&env);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/", post.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(detail["post"]["text"], "hello");
    assert_eq!(detail["comments"][0]["text"], "newer");
    assert_eq!(detail["comments"][1]["text"], "older");

    // Unknown and garbage ids are both 404s
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/", Uuid::new_v4()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/posts/not-a-uuid/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn anonymous_requests_to_gated_routes_redirect_to_login_with_next() {
    let env = TestEnv::new();
    let author = env.seed_user("author").await;
    let post = env.seed_post(&author, "hello", None).await;
    let app = app!(&env);

    let gated = [
        test::TestRequest::post()
            .uri("/create/")
            .set_json(serde_json::json!({"text": "x"})),
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", post.id))
            .set_json(serde_json::json!({"text": "x"})),
        test::TestRequest::post().uri(&format!("/posts/{}/delete/", post.id)),
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", post.id))
            .set_json(serde_json::json!({"text": "x"})),
        test::TestRequest::get().uri("/follow/"),
        test::TestRequest::get().uri("/profile/author/follow/"),
        test::TestRequest::get().uri("/profile/author/unfollow/"),
    ];

    for req in gated {
        let req = req.to_request();
        let path = req.path().to_string();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "path {path}");
        assert_eq!(location(&resp), format!("/auth/login/?next={path}"));
    }

    // Nothing was mutated
    assert_eq!(env.state.posts.list_all().await.unwrap().len(), 1);
    assert_eq!(env.state.follows.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn create_post_attaches_acting_user_and_redirects_to_profile() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let group = env.seed_group("Cats", "cats").await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/")
            .insert_header(env.bearer(&poster))
            .set_json(serde_json::json!({
                "text": "hello world",
                "group": group.id,
                "image": "posts/cat.png",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/poster/");

    let posts = env.state.posts.list_by_author(poster.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text, "hello world");
    assert_eq!(posts[0].group_id, Some(group.id));
    assert_eq!(posts[0].image.as_deref(), Some("posts/cat.png"));
    assert_eq!(posts[0].author_id, poster.id);
}

#[actix_web::test]
async fn create_post_with_blank_text_fails_validation() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/")
            .insert_header(env.bearer(&poster))
            .set_json(serde_json::json!({"text": "   "}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(env.state.posts.list_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn create_post_with_dangling_group_fails_validation() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/")
            .insert_header(env.bearer(&poster))
            .set_json(serde_json::json!({"text": "hi", "group": Uuid::new_v4()}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(env.state.posts.list_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn edit_post_preserves_identity_and_authorship() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let post = env.seed_post(&poster, "original", None).await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(env.bearer(&poster))
            .set_json(serde_json::json!({"text": "updated"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let stored = env.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "updated");
    assert_eq!(stored.author_id, poster.id);
    assert_eq!(stored.pub_date, post.pub_date);
    assert_eq!(env.state.posts.list_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn edit_post_by_non_author_is_a_silent_redirect() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let intruder = env.seed_user("intruder").await;
    let post = env.seed_post(&poster, "original", None).await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(env.bearer(&intruder))
            .set_json(serde_json::json!({"text": "hijacked"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let stored = env.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "original");
}

#[actix_web::test]
async fn edit_form_is_prefilled_for_the_author_only() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let intruder = env.seed_user("intruder").await;
    let post = env.seed_post(&poster, "original", None).await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(env.bearer(&poster))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let form: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(form["text"], "original");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(env.bearer(&intruder))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));
}

#[actix_web::test]
async fn delete_post_is_author_only_and_always_redirects() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let intruder = env.seed_user("intruder").await;
    let post = env.seed_post(&poster, "doomed", None).await;
    let app = app!(&env);

    // Non-author: no-op, redirected to their own profile
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/delete/", post.id))
            .insert_header(env.bearer(&intruder))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/intruder/");
    assert!(env.state.posts.find_by_id(post.id).await.unwrap().is_some());

    // Author: deleted immediately, no confirmation step
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/delete/", post.id))
            .insert_header(env.bearer(&poster))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/poster/");
    assert!(env.state.posts.find_by_id(post.id).await.unwrap().is_none());
}

#[actix_web::test]
async fn add_comment_attaches_author_and_post() {
    let env = TestEnv::new();
    let poster = env.seed_user("poster").await;
    let commenter = env.seed_user("commenter").await;
    let post = env.seed_post(&poster, "hello", None).await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", post.id))
            .insert_header(env.bearer(&commenter))
            .set_json(serde_json::json!({"text": "nice post"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let comments = env.state.comments.list_by_post(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_id, commenter.id);
    assert_eq!(comments[0].text, "nice post");

    // Blank text fails validation, nothing persists
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", post.id))
            .insert_header(env.bearer(&commenter))
            .set_json(serde_json::json!({"text": ""}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(env.state.comments.list_by_post(post.id).await.unwrap().len(), 1);

    // Unknown post is a 404
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", Uuid::new_v4()))
            .insert_header(env.bearer(&commenter))
            .set_json(serde_json::json!({"text": "lost"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn follow_unfollow_round_trip_is_net_zero() {
    let env = TestEnv::new();
    let author = env.seed_user("author").await;
    let fan = env.seed_user("fan").await;
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/follow/")
            .insert_header(env.bearer(&fan))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/author/");
    assert_eq!(env.state.follows.count().await.unwrap(), 1);

    // Repeated follow does not duplicate the relation
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/follow/")
            .insert_header(env.bearer(&fan))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(env.state.follows.count().await.unwrap(), 1);

    // Self-follow is a no-op that still redirects
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/follow/")
            .insert_header(env.bearer(&author))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(env.state.follows.count().await.unwrap(), 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/unfollow/")
            .insert_header(env.bearer(&fan))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/author/");
    assert_eq!(env.state.follows.count().await.unwrap(), 0);

    // Unfollowing an absent relation is a no-op
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/author/unfollow/")
            .insert_header(env.bearer(&fan))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(env.state.follows.count().await.unwrap(), 0);

    // Unknown target is a 404
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/nobody/follow/")
            .insert_header(env.bearer(&fan))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn followed_feed_contains_only_followed_authors() {
    let env = TestEnv::new();
    let followed = env.seed_user("followed").await;
    let stranger = env.seed_user("stranger").await;
    let fan = env.seed_user("fan").await;
    env.seed_post(&followed, "in feed", None).await;
    env.seed_post(&stranger, "not in feed", None).await;
    env.state
        .follows
        .insert(Follow::new(fan.id, followed.id))
        .await
        .unwrap();
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/follow/")
            .insert_header(env.bearer(&fan))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["items"][0]["text"], "in feed");
}

#[actix_web::test]
async fn register_and_login_issue_tokens() {
    let env = TestEnv::new();
    let app = app!(&env);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({
                "username": "newcomer",
                "email": "newcomer@example.com",
                "password": "long enough",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["access_token"].as_str().unwrap().is_empty());

    // Duplicate username is a conflict
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({
                "username": "newcomer",
                "email": "other@example.com",
                "password": "long enough",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({
                "email": "newcomer@example.com",
                "password": "long enough",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({
                "email": "newcomer@example.com",
                "password": "wrong password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
