pub mod test_client;
pub mod test_server;

pub use packet_exchange::{exchange_packets, exchange_packets_n_times};
pub use test_client::TestClient;
pub use test_server::TestServer;
