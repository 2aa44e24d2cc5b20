//! # Sejour Client
//!
//! Everything that talks to the outside world: the booking REST API, the
//! local token storage and the geocoding service.
//!
//! - **ApiClient**: bearer-authenticated JSON/multipart HTTP client
//! - **Resources**: typed list/fetch/create/update/delete over any [`Resource`]
//! - **Session**: the explicit authentication context
//! - **QueryCache**: request deduplication and mutation invalidation
//! - **Geocoder**: address suggestions for address autocomplete
//! - **QR**: SVG rendering of owner verification tokens
//!
//! [`Resource`]: sejour_core::Resource

pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod qr;
pub mod query_cache;
pub mod resources;
pub mod session;
pub mod storage;
pub mod upload;

// Re-export commonly used items at crate root
pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use geocoding::{AddressSuggestion, Geocoder, NominatimGeocoder};
pub use qr::verification_qr_svg;
pub use query_cache::{QueryCache, QueryError, QueryResult};
pub use resources::ListQuery;
pub use session::Session;
pub use storage::{AUTH_TOKEN_KEY, FileStore, MemoryStore, REMEMBERED_EMAIL_KEY, TokenStore};
pub use upload::{ImageUpload, UploadFile, UploadSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a front-end needs, built from one configuration
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub config: ClientConfig,
    pub session: Session,
    pub cache: QueryCache,
}

impl ClientContext {
    /// Build the API client, open storage and create the session
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config)?;
        let store = FileStore::open(&config.storage_path)?;
        tracing::info!(
            api = %config.api_url,
            storage = %config.storage_path.display(),
            "Client configured"
        );
        Ok(Self {
            session: Session::new(api, std::sync::Arc::new(store)),
            cache: QueryCache::new(),
            config,
        })
    }

    /// The API client of the session
    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }
}
