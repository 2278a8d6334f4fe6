pub mod config;
pub mod http;

pub use config::BackendConfig;
pub use http::HttpBackend;
