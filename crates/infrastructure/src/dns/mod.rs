pub mod server;
pub mod socket;
pub mod udp_sender;

pub use server::{DnsSockets, UdpDnsServer};
pub use socket::create_udp_socket;
pub use udp_sender::UdpDatagramSender;
