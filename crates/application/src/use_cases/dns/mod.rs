pub mod forward_query;
pub mod handle_dns_query;
pub mod handle_upstream_response;

pub use forward_query::UpstreamForwarder;
pub use handle_dns_query::{HandleDnsQueryUseCase, QueryOutcome};
pub use handle_upstream_response::{CorrelationOutcome, HandleUpstreamResponseUseCase};
