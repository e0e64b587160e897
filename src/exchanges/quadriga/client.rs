use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::quadriga::rest::QuadrigaRestClient;
use crate::exchanges::quadriga::types::{
    Currency, OrderBook, OrderRequest, SortOrder, TimeFrame, UserTransactionsRequest,
    WithdrawalRequest,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

const DEFAULT_TRADES_LIMIT: u32 = 100;

/// Client for the QuadrigaCX v2 API.
///
/// Order book and currency arguments are plain strings checked against the
/// exchange's fixed sets before anything is sent; an unknown value comes back
/// as [`ExchangeError::InvalidOrderBook`] or [`ExchangeError::InvalidCurrency`]
/// without touching the network. Every other failure is a transport error
/// from the underlying [`RestClient`].
///
/// Book arguments are optional: `None` means the client's default book.
#[derive(Debug, Clone)]
pub struct QuadrigaClient<R: RestClient> {
    rest: QuadrigaRestClient<R>,
    client_id: String,
    default_book: OrderBook,
}

impl<R: RestClient> QuadrigaClient<R> {
    /// Create a client over an existing transport.
    ///
    /// Fails with `InvalidOrderBook` if `default_book` is not a known book.
    pub fn new(rest: R, client_id: String, default_book: &str) -> Result<Self, ExchangeError> {
        Ok(Self {
            rest: QuadrigaRestClient::new(rest),
            client_id,
            default_book: default_book.parse()?,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn default_book(&self) -> OrderBook {
        self.default_book
    }

    /// Replace the default order book. On error the previous default stays.
    pub fn set_default_book(&mut self, book: &str) -> Result<(), ExchangeError> {
        self.default_book = book.parse()?;
        debug!(client = %self.client_id, "default order book set to {}", self.default_book);
        Ok(())
    }

    pub fn rest(&self) -> &QuadrigaRestClient<R> {
        &self.rest
    }

    fn resolve_book(&self, book: Option<&str>) -> Result<OrderBook, ExchangeError> {
        book.map_or(Ok(self.default_book), str::parse::<OrderBook>)
    }

    /// Latest trading summary (ticker) for a book.
    pub async fn get_summary(&self, book: Option<&str>) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "get trading summary for {}", book);
        self.rest.ticker(book).await
    }

    /// All public open orders; `group` merges orders at the same price.
    pub async fn get_public_orders(
        &self,
        group: bool,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "get public orders for {}", book);
        self.rest.order_book(book, group).await
    }

    /// Recently completed public trades within the last minute or hour.
    pub async fn get_public_trades(
        &self,
        time: TimeFrame,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "get recent public trades for {}", book);
        self.rest.transactions(book, time).await
    }

    /// The user's open orders.
    pub async fn get_orders(&self, book: Option<&str>) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "get user's open orders for {}", book);
        self.rest.open_orders(book).await
    }

    /// The user's completed trades. A `limit` of 0 asks for all of them;
    /// unset arguments default to 100 trades from offset 0, newest first.
    pub async fn get_trades(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
        sort: Option<SortOrder>,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "get user's completed trades for {}", book);
        let request = UserTransactionsRequest {
            book,
            limit: limit.unwrap_or(DEFAULT_TRADES_LIMIT),
            offset: offset.unwrap_or(0),
            sort: sort.unwrap_or_default(),
        };
        self.rest.user_transactions(&request).await
    }

    pub async fn get_balance(&self) -> Result<Value, ExchangeError> {
        debug!(client = %self.client_id, "get user's account balance");
        self.rest.balance().await
    }

    pub async fn buy_market_order(
        &self,
        amount: Decimal,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "buy {} at market price for {}", amount, book);
        self.rest
            .buy(&OrderRequest {
                book,
                amount,
                price: None,
            })
            .await
    }

    pub async fn buy_limit_order(
        &self,
        amount: Decimal,
        price: Decimal,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "buy {} at price of {} for {}", amount, price, book);
        self.rest
            .buy(&OrderRequest {
                book,
                amount,
                price: Some(price),
            })
            .await
    }

    pub async fn sell_market_order(
        &self,
        amount: Decimal,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "sell {} at market price for {}", amount, book);
        self.rest
            .sell(&OrderRequest {
                book,
                amount,
                price: None,
            })
            .await
    }

    pub async fn sell_limit_order(
        &self,
        amount: Decimal,
        price: Decimal,
        book: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let book = self.resolve_book(book)?;
        debug!(client = %self.client_id, "sell {} at price of {} for {}", amount, price, book);
        self.rest
            .sell(&OrderRequest {
                book,
                amount,
                price: Some(price),
            })
            .await
    }

    /// Look up an order by its 64 hex character ID.
    pub async fn lookup_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        debug!(client = %self.client_id, "look up order {}", order_id);
        self.rest.lookup_order(order_id).await
    }

    /// Cancel an open order by its 64 hex character ID.
    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        debug!(client = %self.client_id, "cancel order {}", order_id);
        self.rest.cancel_order(order_id).await
    }

    /// Deposit address for `bitcoin` or `ether`.
    pub async fn get_deposit_address(&self, currency: &str) -> Result<Value, ExchangeError> {
        let currency: Currency = currency.parse()?;
        debug!(client = %self.client_id, "get deposit address for {}", currency);
        self.rest.deposit_address(currency).await
    }

    /// Withdraw `amount` of `bitcoin` or `ether` to `address`.
    pub async fn withdraw(
        &self,
        currency: &str,
        amount: Decimal,
        address: &str,
    ) -> Result<Value, ExchangeError> {
        let currency: Currency = currency.parse()?;
        debug!(client = %self.client_id, "withdraw {} {}s to {}", amount, currency, address);
        let request = WithdrawalRequest {
            address: address.to_string(),
            amount,
        };
        self.rest.withdraw(currency, &request).await
    }
}
