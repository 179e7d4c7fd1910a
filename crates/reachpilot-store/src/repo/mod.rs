pub mod connections;

pub use connections::{ConnectionPage, ConnectionStats, ConnectionUpdate, ConnectionsRepo};
