pub mod request_tracing;

pub use request_tracing::{RequestTracing, REQUEST_ID_HEADER};
