pub mod config;
pub mod supervisor;

pub use config::ServerConfig;
pub use supervisor::{ServerState, VanilliServer};
