use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::quadriga::types::{
    BookRequest, Currency, OrderBook, OrderIdRequest, OrderRequest, TimeFrame,
    UserTransactionsRequest, WithdrawalRequest,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Thin typed wrapper around `RestClient` for the QuadrigaCX v2 API
///
/// Every argument is already a validated type here, so endpoint selection
/// cannot fail; string validation happens one layer up in `QuadrigaClient`.
#[derive(Debug, Clone)]
pub struct QuadrigaRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> QuadrigaRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &R {
        &self.client
    }

    pub async fn ticker(&self, book: OrderBook) -> Result<Value, ExchangeError> {
        self.client
            .get("/ticker", &[("book", book.as_str())])
            .await
    }

    pub async fn order_book(&self, book: OrderBook, group: bool) -> Result<Value, ExchangeError> {
        let group = if group { "1" } else { "0" };
        self.client
            .get("/order_book", &[("book", book.as_str()), ("group", group)])
            .await
    }

    pub async fn transactions(
        &self,
        book: OrderBook,
        time: TimeFrame,
    ) -> Result<Value, ExchangeError> {
        self.client
            .get(
                "/transactions",
                &[("book", book.as_str()), ("time", time.as_str())],
            )
            .await
    }

    pub async fn open_orders(&self, book: OrderBook) -> Result<Value, ExchangeError> {
        self.signed("/open_orders", &BookRequest { book }).await
    }

    pub async fn user_transactions(
        &self,
        request: &UserTransactionsRequest,
    ) -> Result<Value, ExchangeError> {
        self.signed("/user_transactions", request).await
    }

    pub async fn balance(&self) -> Result<Value, ExchangeError> {
        self.client.post("/balance", Map::new()).await
    }

    pub async fn buy(&self, order: &OrderRequest) -> Result<Value, ExchangeError> {
        self.signed("/buy", order).await
    }

    pub async fn sell(&self, order: &OrderRequest) -> Result<Value, ExchangeError> {
        self.signed("/sell", order).await
    }

    pub async fn lookup_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let request = OrderIdRequest {
            id: order_id.to_string(),
        };
        self.signed("/lookup_order", &request).await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let request = OrderIdRequest {
            id: order_id.to_string(),
        };
        self.signed("/cancel_order", &request).await
    }

    pub async fn deposit_address(&self, currency: Currency) -> Result<Value, ExchangeError> {
        self.client
            .post(currency.deposit_address_endpoint(), Map::new())
            .await
    }

    pub async fn withdraw(
        &self,
        currency: Currency,
        request: &WithdrawalRequest,
    ) -> Result<Value, ExchangeError> {
        self.signed(currency.withdrawal_endpoint(), request).await
    }

    async fn signed<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        request: &T,
    ) -> Result<Value, ExchangeError> {
        let payload = to_payload(request)?;
        self.client.post(endpoint, payload).await
    }
}

fn to_payload<T: Serialize>(request: &T) -> Result<Map<String, Value>, ExchangeError> {
    match serde_json::to_value(request)? {
        Value::Object(map) => Ok(map),
        other => Err(ExchangeError::InvalidParameters(format!(
            "Request body must be a JSON object, got {}",
            other
        ))),
    }
}
