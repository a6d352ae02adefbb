//! Post CRUD. Reads are public, every mutation needs a bearer token.

use actix_web::{HttpResponse, web};
use validator::Validate;

use postboard_core::domain::{NewPost, Post, PostChanges};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PageRequest, PostRepository};
use postboard_shared::dto::{CreatedPostResponse, ListPostsQuery, PostRequest, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        published: post.published,
        created_at: post.created_at,
        owner_id: post.owner_id,
    }
}

fn post_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("post with id:{} does not exist", id))
}

/// POST /posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .create(NewPost {
            owner_id: identity.user_id,
            title: req.title,
            content: req.content,
            published: req.published,
        })
        .await?;

    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(CreatedPostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
    }))
}

/// GET /posts?limit=&skip=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let config = state.posts_config;
    let limit = query
        .limit
        .unwrap_or(config.default_limit)
        .clamp(1, config.max_limit);
    let offset = u64::from(query.skip.unwrap_or(0));

    let posts = state.posts.list(PageRequest::new(limit, offset)).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /posts/{id} - full replacement.
pub async fn update_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .update(
            id,
            PostChanges {
                title: req.title,
                content: req.content,
                published: req.published,
            },
        )
        .await?
        .ok_or_else(|| post_not_found(id))?;

    tracing::info!(post_id = id, user_id = identity.user_id, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    })?;

    tracing::info!(post_id = id, user_id = identity.user_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
