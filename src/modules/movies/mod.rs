pub mod handlers;
pub mod models;
pub mod store;

use async_trait::async_trait;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use reel_kernel::{InitCtx, Module};
use utoipa::OpenApi;

use handlers::MoviesState;
use store::MovieStore;

/// OpenAPI fragment for the movies routes, relative to the module mount.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_movies,
        handlers::get_movie,
        handlers::create_movie,
        handlers::update_movie,
        handlers::delete_movie
    ),
    components(schemas(models::Movie, models::Director)),
    tags((name = "Movies", description = "In-memory movie catalogue"))
)]
pub struct MoviesApi;

/// Movies module: owns the catalogue and serves CRUD routes over it
pub struct MoviesModule {
    state: MoviesState,
}

impl MoviesModule {
    /// Module with an empty catalogue, seeded during `init` when configured
    pub fn new() -> Self {
        Self::with_store(MovieStore::new())
    }

    pub fn with_store(store: MovieStore) -> Self {
        Self {
            state: MoviesState::new(store),
        }
    }

    pub fn state(&self) -> &MoviesState {
        &self.state
    }
}

impl Default for MoviesModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for MoviesModule {
    fn name(&self) -> &'static str {
        "movies"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let mut store = self.state.store().write().await;
        if ctx.settings.movies.seed_demo_data && store.is_empty() {
            store.seed();
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            movies = store.len(),
            "movies module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(handlers::list_movies).post(handlers::create_movie),
            )
            .route(
                "/{id}",
                get(handlers::get_movie)
                    .put(handlers::update_movie)
                    .delete(handlers::delete_movie),
            )
            // Bodies of any size are buffered; rejection is left to decoding.
            .layer(DefaultBodyLimit::disable())
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        match serde_json::to_value(MoviesApi::openapi()) {
            Ok(fragment) => Some(fragment),
            Err(err) => {
                tracing::warn!(module = self.name(), error = %err, "failed to encode OpenAPI fragment");
                None
            }
        }
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "movies module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let movies = self.state.store().read().await.len();
        tracing::info!(module = self.name(), movies, "movies module stopped, catalogue discarded");
        Ok(())
    }
}

/// Create a new instance of the movies module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(MoviesModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_kernel::settings::Settings;

    #[tokio::test]
    async fn init_seeds_demo_records_once() {
        let module = MoviesModule::new();
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        module.init(&ctx).await.unwrap();
        module.init(&ctx).await.unwrap();

        let store = module.state().store().read().await;
        let ids: Vec<_> = store.list().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn init_respects_disabled_seeding() {
        let module = MoviesModule::new();
        let mut settings = Settings::default();
        settings.movies.seed_demo_data = false;
        let ctx = InitCtx {
            settings: &settings,
        };

        module.init(&ctx).await.unwrap();
        assert!(module.state().store().read().await.is_empty());
    }

    #[test]
    fn openapi_fragment_documents_both_paths() {
        let fragment = MoviesModule::new().openapi().unwrap();
        assert!(fragment["paths"]["/"]["get"].is_object());
        assert!(fragment["paths"]["/"]["post"].is_object());
        assert!(fragment["paths"]["/{id}"]["put"].is_object());
        assert!(fragment["paths"]["/{id}"]["delete"].is_object());
        assert!(fragment["components"]["schemas"]["Movie"].is_object());
        assert!(fragment["components"]["schemas"]["Director"].is_object());
    }
}
