pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::{init_tracing, shutdown_tracing};
pub use metrics::{get_metrics, init_metrics};
pub use trace_context::{
    TRACEPARENT_HEADER, TRACESTATE_HEADER, TracedClientExt, TracedRequest, inject_trace_context,
};
