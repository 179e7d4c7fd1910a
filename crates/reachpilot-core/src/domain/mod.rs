pub mod connection;
pub mod ids;

pub use connection::Connection;
pub use ids::ConnectionId;
