pub mod blocklist_filter;
pub mod dns_message;
pub mod pending_requests;
pub mod record_lookup;
pub mod record_type_map;
pub mod response_cache;
pub mod response_encoder;

pub use blocklist_filter::BlocklistFilter;
pub use dns_message::{DecodedResponse, DnsMessageCodec, InboundQuery};
pub use pending_requests::{Advance, PendingRequest, PendingRequestTable};
pub use record_lookup::RecordLookup;
pub use record_type_map::RecordTypeMapper;
pub use response_cache::ResponseCache;
pub use response_encoder::ResponseEncoder;
