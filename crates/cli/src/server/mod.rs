pub mod dns;

pub use dns::{bind_sockets, run_dns_server};
