pub mod builder;
pub mod client;
pub mod rest;
pub mod types;

// Re-export main types for easier importing
pub use builder::build_client;
pub use client::QuadrigaClient;
pub use rest::QuadrigaRestClient;
pub use types::{Currency, OrderBook, PublicOrderBook, SortOrder, TimeFrame};
