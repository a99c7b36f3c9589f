pub mod classifier;
pub mod config;
pub mod error;
pub mod identity;
pub mod server;

pub use classifier::{Classification, classify};
pub use config::{AppConfig, IdentityConfig};
pub use error::{RequestError, ServiceError};
pub use identity::Identity;
pub use server::{BfhlResponse, build_router, process_payload};
