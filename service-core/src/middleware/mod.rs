pub mod metrics;
pub mod panic;
pub mod tracing;

pub use self::metrics::metrics_middleware;
pub use self::panic::{PanicResponse, catch_panic_layer};
pub use self::tracing::{REQUEST_ID_HEADER, http_trace_layer, request_id_middleware};
