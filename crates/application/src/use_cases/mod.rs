pub mod dns;

pub use dns::{
    CorrelationOutcome, HandleDnsQueryUseCase, HandleUpstreamResponseUseCase, QueryOutcome,
    UpstreamForwarder,
};
