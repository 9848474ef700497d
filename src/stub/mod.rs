pub mod builder;
pub mod options;
pub mod transform;
pub mod types;

pub use builder::Stub;
pub use options::{MatchOptions, RequestOptions, ResponseSpec};
pub use transform::JSON_CONTENT_TYPE;
pub use types::{Criteria, MatchValue, Method, StubResponse, Times};
