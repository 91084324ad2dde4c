//! In-process stand-in for JSONPlaceholder.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use probe_domain::BaseAddress;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const POST_COUNT: u64 = 100;

fn post(id: u64) -> Value {
    let (title, body) = if id == 11 {
        (
            "et ea vero quia laudantium autem".to_string(),
            "delectus reiciendis molestiae occaecati non minima eveniet qui voluptatibus"
                .to_string(),
        )
    } else {
        (format!("title of post {id}"), format!("body of post {id}"))
    };
    json!({
        "userId": (id - 1) / 10 + 1,
        "id": id,
        "title": title,
        "body": body,
    })
}

fn comments(post_id: u64) -> Vec<Value> {
    (1..=5)
        .map(|n| {
            json!({
                "postId": post_id,
                "id": (post_id - 1) * 5 + n,
                "name": format!("comment {n}"),
                "email": format!("reader{n}@example.com"),
                "body": "nice post",
            })
        })
        .collect()
}

fn known_post(id: u64) -> Result<u64, StatusCode> {
    if (1..=POST_COUNT).contains(&id) {
        Ok(id)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn list_posts() -> Json<Value> {
    Json(Value::Array((1..=POST_COUNT).map(post).collect()))
}

async fn get_post(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    Ok(Json(post(known_post(id)?)))
}

async fn create_post(Json(mut body): Json<Value>) -> impl IntoResponse {
    if let Some(fields) = body.as_object_mut() {
        fields.insert("id".into(), json!(POST_COUNT + 1));
    }
    (StatusCode::CREATED, Json(body))
}

async fn replace_post(Path(id): Path<u64>, Json(mut body): Json<Value>) -> Json<Value> {
    if let Some(fields) = body.as_object_mut() {
        fields.insert("id".into(), json!(id));
    }
    Json(body)
}

async fn update_post(
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut current = post(known_post(id)?);
    if let (Some(target), Some(changes)) = (current.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(current))
}

async fn delete_post(Path(_id): Path<u64>) -> Json<Value> {
    Json(json!({}))
}

async fn post_comments(Path(id): Path<u64>) -> Json<Value> {
    Json(Value::Array(comments(id)))
}

async fn query_comments(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let all = (1..=POST_COUNT).flat_map(comments);
    let selected: Vec<Value> = match params.get("postId").and_then(|v| v.parse::<u64>().ok()) {
        Some(post_id) => all.filter(|c| c["postId"] == json!(post_id)).collect(),
        None => all.collect(),
    };
    Json(Value::Array(selected))
}

async fn get_user(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({
        "id": id,
        "name": "Chelsey Dietrich",
        "username": "Kamren",
    }))
}

/// Routes mirroring the endpoints the catalog exercises.
pub fn router() -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(replace_post)
                .patch(update_post)
                .delete(delete_post),
        )
        .route("/posts/{id}/comments", get(post_comments))
        .route("/comments", get(query_comments))
        .route("/users/{id}", get(get_user))
}

/// Serves `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Starts the fake service and returns its base address.
pub async fn fake_jsonplaceholder() -> BaseAddress {
    let addr = serve(router()).await;
    BaseAddress::parse(&format!("http://{addr}")).unwrap()
}
