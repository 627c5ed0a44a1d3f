//! Application state - shared across all handlers.

use std::sync::Arc;

use inbrief_core::NewsService;
use inbrief_core::ports::{MediaUploader, PostRepository};
use inbrief_infra::{CloudinaryUploader, DisabledUploader, InMemoryPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub news: NewsService,
    pub uploader: Arc<dyn MediaUploader>,
    pub upload_folder: String,
}

impl AppState {
    /// Build the application state with appropriate implementations,
    /// prepare the schema and seed an empty store.
    ///
    /// An unreachable database does not fail startup; the health endpoint
    /// reports it instead. Only an unusable database configuration is fatal.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let repo = Self::connect_store(config).await?;

        let uploader: Arc<dyn MediaUploader> = match config.cloudinary.clone() {
            Some(cloudinary) => match CloudinaryUploader::new(cloudinary) {
                Ok(uploader) => Arc::new(uploader),
                Err(e) => {
                    tracing::error!("Failed to build media host client: {}. Uploads disabled.", e);
                    Arc::new(DisabledUploader)
                }
            },
            None => {
                tracing::warn!("Cloudinary credentials not set. Image uploads disabled.");
                Arc::new(DisabledUploader)
            }
        };

        let state = Self::from_parts(repo, uploader, config.upload_folder.clone());
        state.seed().await;

        tracing::info!("Application state initialized");
        Ok(state)
    }

    pub fn from_parts(
        repo: Arc<dyn PostRepository>,
        uploader: Arc<dyn MediaUploader>,
        upload_folder: impl Into<String>,
    ) -> Self {
        Self {
            news: NewsService::new(repo),
            uploader,
            upload_folder: upload_folder.into(),
        }
    }

    /// Insert the sample posts into an empty store. Failures are logged only.
    pub async fn seed(&self) {
        match self.news.seed_samples().await {
            Ok(0) => tracing::debug!("Store already populated, no sample posts added"),
            Ok(n) => tracing::info!(inserted = n, "Sample posts added"),
            Err(e) => tracing::error!("Sample data seeding failed: {}", e),
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_store(config: &AppConfig) -> std::io::Result<Arc<dyn PostRepository>> {
        use inbrief_infra::{DatabaseConnections, PostgresPostRepository};
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Arc::new(InMemoryPostRepository::new()));
        };

        let connections = DatabaseConnections::init(db_config).await.map_err(|e| {
            tracing::error!("Failed to set up database pool: {}", e);
            std::io::Error::other(e.to_string())
        })?;

        match Migrator::up(&connections.main, None).await {
            Ok(()) => tracing::info!("Database schema is up to date"),
            Err(e) => tracing::error!("Database initialization error: {}", e),
        }

        Ok(Arc::new(PostgresPostRepository::new(connections.main)))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_store(_config: &AppConfig) -> std::io::Result<Arc<dyn PostRepository>> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Arc::new(InMemoryPostRepository::new()))
    }
}
