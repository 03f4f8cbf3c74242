//! Route handlers for the movies module.
//!
//! Bodies are taken as raw bytes and decoded here so that malformed input
//! always yields the same `400 Bad Request` regardless of content type.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use reel_http::{AppError, AppResult};
use serde::Serialize;
use tokio::sync::RwLock;

use super::models::Movie;
use super::store::{MovieStore, StoreError};

const NOT_FOUND_MESSAGE: &str = "Movie Not Found";
const BAD_REQUEST_MESSAGE: &str = "Bad Request";

/// Shared handle to the catalogue, injected into every handler.
///
/// All access goes through one read/write lock. Handlers never await while
/// holding the guard.
#[derive(Clone, Default)]
pub struct MoviesState {
    store: Arc<RwLock<MovieStore>>,
}

impl MoviesState {
    pub fn new(store: MovieStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub fn store(&self) -> &Arc<RwLock<MovieStore>> {
        &self.store
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.into())
    }
}

/// JSON response body terminated by a newline.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T: Serialize> IntoResponse for JsonBody<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(mut bytes) => {
                bytes.push(b'\n');
                (
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("application/json"),
                    )],
                    bytes,
                )
                    .into_response()
            }
            Err(err) => AppError::Internal(err.into()).into_response(),
        }
    }
}

fn movie_not_found(id: &str) -> AppError {
    tracing::debug!(movie_id = %id, "movie lookup missed");
    AppError::not_found(NOT_FOUND_MESSAGE)
}

/// Decode the first JSON value in `body` into a movie.
///
/// A literal `null` decodes to an empty movie and anything after the first
/// value is ignored. An empty or unreadable body is rejected.
fn decode_movie(body: Result<Bytes, BytesRejection>) -> AppResult<Movie> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "movie body could not be read");
        AppError::bad_request(BAD_REQUEST_MESSAGE)
    })?;

    let mut values = serde_json::Deserializer::from_slice(&body).into_iter::<Option<Movie>>();

    match values.next() {
        Some(Ok(movie)) => Ok(movie.unwrap_or_default()),
        Some(Err(err)) => {
            tracing::debug!(error = %err, "movie body rejected");
            Err(AppError::bad_request(BAD_REQUEST_MESSAGE))
        }
        None => {
            tracing::debug!("movie body is empty");
            Err(AppError::bad_request(BAD_REQUEST_MESSAGE))
        }
    }
}

/// GET /movies
#[utoipa::path(
    get,
    path = "/",
    tag = "Movies",
    responses(
        (status = 200, description = "Every movie in insertion order", body = Vec<Movie>)
    )
)]
pub async fn list_movies(State(state): State<MoviesState>) -> JsonBody<Vec<Movie>> {
    let store = state.store.read().await;
    JsonBody(store.list().to_vec())
}

/// GET /movies/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "The movie", body = Movie),
        (status = 404, description = "Movie Not Found", body = String, content_type = "text/plain")
    )
)]
pub async fn get_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
) -> AppResult<JsonBody<Movie>> {
    let store = state.store.read().await;
    let movie = store.get(&id).ok_or_else(|| movie_not_found(&id))?;
    Ok(JsonBody(movie.clone()))
}

/// POST /movies
///
/// Any `id` in the body is replaced by a freshly issued one.
#[utoipa::path(
    post,
    path = "/",
    tag = "Movies",
    request_body = Movie,
    responses(
        (status = 200, description = "Catalogue after the insert", body = Vec<Movie>),
        (status = 400, description = "Bad Request", body = String, content_type = "text/plain")
    )
)]
pub async fn create_movie(
    State(state): State<MoviesState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<JsonBody<Vec<Movie>>> {
    let mut movie = decode_movie(body)?;

    let mut store = state.store.write().await;
    movie.id = store.issue_id()?;
    tracing::info!(movie_id = %movie.id, title = %movie.title, "movie created");
    store.append(movie);

    Ok(JsonBody(store.list().to_vec()))
}

/// PUT /movies/{id}
///
/// Existence is checked before the body is decoded, so a missing id wins
/// over a malformed body. The record is replaced wholesale.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie identifier")),
    request_body = Movie,
    responses(
        (status = 200, description = "Catalogue after the replace", body = Vec<Movie>),
        (status = 400, description = "Bad Request", body = String, content_type = "text/plain"),
        (status = 404, description = "Movie Not Found", body = String, content_type = "text/plain")
    )
)]
pub async fn update_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<JsonBody<Vec<Movie>>> {
    let mut store = state.store.write().await;
    let index = store.find_index(&id).ok_or_else(|| movie_not_found(&id))?;

    let mut movie = decode_movie(body)?;
    movie.id = id;
    tracing::info!(movie_id = %movie.id, index, "movie replaced");
    store.replace_at(index, movie);

    Ok(JsonBody(store.list().to_vec()))
}

/// DELETE /movies/{id}
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Catalogue after the removal", body = Vec<Movie>),
        (status = 404, description = "Movie Not Found", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
) -> AppResult<JsonBody<Vec<Movie>>> {
    let mut store = state.store.write().await;
    let index = store.find_index(&id).ok_or_else(|| movie_not_found(&id))?;

    store.remove_at(index);
    tracing::info!(movie_id = %id, "movie deleted");

    Ok(JsonBody(store.list().to_vec()))
}
