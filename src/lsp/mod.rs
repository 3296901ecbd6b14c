pub mod backend;
pub mod config;
pub mod document;
pub mod features;
pub mod publisher;

pub use backend::RecetteBackend;
pub use config::ServerConfig;
