pub mod client;
pub mod types;

// Re-export commonly used types for convenient access
pub use client::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STUB_PRIORITY, VanilliClient};
pub use types::{CapturedRequest, Endpoint, VerificationReport};
