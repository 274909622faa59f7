pub mod answer;
pub mod record_data;
pub mod record_type;
pub mod rrset;

pub use answer::ResourceAnswer;
pub use record_data::RecordData;
pub use record_type::RecordType;
pub use rrset::RRset;
