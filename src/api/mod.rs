pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use metrics::DocumentMetrics;
pub use routes::configure_routes;
pub use state::ApiState;
