mod handlers;
mod middleware;
mod router;
mod state;
mod util;

pub use handlers::paymaster::API_KEY_MISSING;
pub use handlers::types::ApiError;
pub use middleware::correlation::{CorrelationId, REQUEST_ID_HEADER};
pub use router::{build_router, run_http_server};
pub use state::ApiState;
