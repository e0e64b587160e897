pub mod core;
pub mod exchanges;

pub use crate::core::{config::ExchangeConfig, errors::ExchangeError, errors::RequestError};
pub use crate::exchanges::quadriga::{
    build_client, Currency, OrderBook, QuadrigaClient, SortOrder, TimeFrame,
};
