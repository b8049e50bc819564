pub mod config;
pub mod errors;
pub mod http;
pub mod models;

pub use config::Config;
pub use errors::DaneoError;
pub use models::WordRecord;
