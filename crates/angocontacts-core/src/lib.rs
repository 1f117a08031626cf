//! Domain model and contact-cleaning engine for AngoContacts.
//!
//! Everything here is synchronous and storage-agnostic: the collection store,
//! the search adapter and the exporters all build on these types.

pub mod app_config;
pub mod config;
pub mod dedup;
pub mod email;
pub mod model;
pub mod normalize;
pub mod sanitize;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dedup::dedup_by_name;
pub use email::is_valid_email;
pub use model::{
    Company, Notification, NotificationKind, SavedSearch, SearchQuery, SocialLink,
};
pub use normalize::{normalize_email, normalize_name, normalize_phone};
pub use sanitize::{sanitize, ContactRecord, Sanitized, Sanitizer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
