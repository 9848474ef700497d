pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod server;
pub mod stub;
pub mod utils;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigLoader, VanilliConfig};
pub use error::{Result, VanilliError};
pub use http::{CapturedRequest, VanilliClient};
pub use server::{ServerConfig, ServerState, VanilliServer};
pub use stub::{MatchOptions, MatchValue, Method, RequestOptions, ResponseSpec, Stub, Times};
