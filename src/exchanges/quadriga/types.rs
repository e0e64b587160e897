use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order books (trading pairs) supported by QuadrigaCX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBook {
    BtcCad,
    BtcUsd,
    #[default]
    EthCad,
    EthUsd,
}

impl OrderBook {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BtcCad => "btc_cad",
            Self::BtcUsd => "btc_usd",
            Self::EthCad => "eth_cad",
            Self::EthUsd => "eth_usd",
        }
    }

    pub const fn all() -> [Self; 4] {
        [Self::BtcCad, Self::BtcUsd, Self::EthCad, Self::EthUsd]
    }

    fn allowed() -> Vec<&'static str> {
        Self::all().iter().map(|b| b.as_str()).collect()
    }
}

impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBook {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|book| book.as_str() == s)
            .ok_or_else(|| ExchangeError::InvalidOrderBook {
                book: s.to_string(),
                allowed: Self::allowed(),
            })
    }
}

/// Major currencies that can be deposited and withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Bitcoin,
    Ether,
}

impl Currency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bitcoin => "bitcoin",
            Self::Ether => "ether",
        }
    }

    pub const fn all() -> [Self; 2] {
        [Self::Bitcoin, Self::Ether]
    }

    pub const fn deposit_address_endpoint(self) -> &'static str {
        match self {
            Self::Bitcoin => "/bitcoin_deposit_address",
            Self::Ether => "/ether_deposit_address",
        }
    }

    pub const fn withdrawal_endpoint(self) -> &'static str {
        match self {
            Self::Bitcoin => "/bitcoin_withdrawal",
            Self::Ether => "/ether_withdrawal",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|currency| currency.as_str() == s)
            .ok_or_else(|| ExchangeError::InvalidCurrency {
                currency: s.to_string(),
                allowed: Self::all().iter().map(|c| c.as_str()).collect(),
            })
    }
}

/// Window for the public trade history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Minute,
    #[default]
    Hour,
}

impl TimeFrame {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

// Signed request bodies. None of these may carry a `key`, `nonce` or
// `signature` field; the transport owns those.

#[derive(Debug, Clone, Serialize)]
pub struct BookRequest {
    pub book: OrderBook,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserTransactionsRequest {
    pub book: OrderBook,
    pub limit: u32,
    pub offset: u32,
    pub sort: SortOrder,
}

/// `/buy` and `/sell`; a limit order carries a price, a market order does not.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub book: OrderBook,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderIdRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalRequest {
    pub address: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Body of `/order_book`.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicOrderBook {
    #[serde(deserialize_with = "de_u64_from_str_or_num")]
    pub timestamp: u64,
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}

fn de_u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
