//! Blocking facade over [`HttpClient`](super::HttpClient).
//!
//! Each method drives the async call to completion on a private
//! current-thread runtime, so the calling thread blocks until the response
//! (or error) is available.
//!
//! Do not use it from inside an async context: `block_on` panics when called
//! from a runtime worker thread.
//!
//! # Example
//!
//! ```no_run
//! use binance_sdk::spot::{BlockingClient, Config};
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = BlockingClient::new(Config::default())?;
//! client.ping()?;
//! println!("server time: {}", client.server_time()?);
//! # Ok(())
//! # }
//! ```

use tokio::runtime::{Builder, Runtime};

use super::{
    Config, HttpClient,
    error::Result,
    types::{
        Account, AggTrade, AllOrdersRequest, BookTicker, CancelOrderRequest, CancelOrderResponse,
        Candlestick, CandlestickInterval, ExchangeInfo, ListenKey, MyTrade, MyTradesRequest,
        NewOrder, NewOrderResponse, OpenOrdersRequest, Order, OrderBook, OrderStatusRequest,
        TickerPrice, TickerStatistics, Trade,
    },
};

/// Synchronous Spot client.
pub struct BlockingClient {
    runtime: Runtime,
    client: HttpClient,
}

impl BlockingClient {
    /// Creates a new blocking client.
    pub fn new(config: Config) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let client = HttpClient::new(config)?;
        Ok(Self { runtime, client })
    }

    /// Wraps an existing async client.
    pub fn from_async(client: HttpClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime, client })
    }

    /// Returns the underlying async client.
    #[must_use]
    pub fn inner(&self) -> &HttpClient {
        &self.client
    }

    pub fn ping(&self) -> Result<()> {
        self.runtime.block_on(self.client.ping())
    }

    pub fn server_time(&self) -> Result<u64> {
        self.runtime.block_on(self.client.server_time())
    }

    pub fn exchange_info(&self) -> Result<ExchangeInfo> {
        self.runtime.block_on(self.client.exchange_info())
    }

    pub fn order_book(&self, symbol: &str, limit: Option<u16>) -> Result<OrderBook> {
        self.runtime.block_on(self.client.order_book(symbol, limit))
    }

    pub fn trades(&self, symbol: &str, limit: Option<u16>) -> Result<Vec<Trade>> {
        self.runtime.block_on(self.client.trades(symbol, limit))
    }

    pub fn historical_trades(
        &self,
        symbol: &str,
        limit: Option<u16>,
        from_id: Option<u64>,
    ) -> Result<Vec<Trade>> {
        self.runtime
            .block_on(self.client.historical_trades(symbol, limit, from_id))
    }

    pub fn agg_trades(
        &self,
        symbol: &str,
        from_id: Option<u64>,
        limit: Option<u16>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> Result<Vec<AggTrade>> {
        self.runtime.block_on(
            self.client
                .agg_trades(symbol, from_id, limit, start_time, end_time),
        )
    }

    pub fn candlesticks(
        &self,
        symbol: &str,
        interval: CandlestickInterval,
        limit: Option<u16>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> Result<Vec<Candlestick>> {
        self.runtime.block_on(
            self.client
                .candlesticks(symbol, interval, limit, start_time, end_time),
        )
    }

    pub fn ticker_24h(&self, symbol: &str) -> Result<TickerStatistics> {
        self.runtime.block_on(self.client.ticker_24h(symbol))
    }

    pub fn all_tickers_24h(&self) -> Result<Vec<TickerStatistics>> {
        self.runtime.block_on(self.client.all_tickers_24h())
    }

    pub fn price(&self, symbol: &str) -> Result<TickerPrice> {
        self.runtime.block_on(self.client.price(symbol))
    }

    pub fn all_prices(&self) -> Result<Vec<TickerPrice>> {
        self.runtime.block_on(self.client.all_prices())
    }

    pub fn book_ticker(&self, symbol: &str) -> Result<BookTicker> {
        self.runtime.block_on(self.client.book_ticker(symbol))
    }

    pub fn book_tickers(&self) -> Result<Vec<BookTicker>> {
        self.runtime.block_on(self.client.book_tickers())
    }

    pub fn new_order(&self, order: NewOrder) -> Result<NewOrderResponse> {
        self.runtime.block_on(self.client.new_order(order))
    }

    pub fn new_order_test(&self, order: NewOrder) -> Result<()> {
        self.runtime.block_on(self.client.new_order_test(order))
    }

    pub fn order_status(&self, req: OrderStatusRequest) -> Result<Order> {
        self.runtime.block_on(self.client.order_status(req))
    }

    pub fn cancel_order(&self, req: CancelOrderRequest) -> Result<CancelOrderResponse> {
        self.runtime.block_on(self.client.cancel_order(req))
    }

    pub fn open_orders(&self, req: OpenOrdersRequest) -> Result<Vec<Order>> {
        self.runtime.block_on(self.client.open_orders(req))
    }

    pub fn all_orders(&self, req: AllOrdersRequest) -> Result<Vec<Order>> {
        self.runtime.block_on(self.client.all_orders(req))
    }

    pub fn account(&self) -> Result<Account> {
        self.runtime.block_on(self.client.account())
    }

    pub fn account_with(&self, recv_window: Option<u64>, timestamp: Option<u64>) -> Result<Account> {
        self.runtime
            .block_on(self.client.account_with(recv_window, timestamp))
    }

    pub fn my_trades(&self, req: MyTradesRequest) -> Result<Vec<MyTrade>> {
        self.runtime.block_on(self.client.my_trades(req))
    }

    pub fn start_user_data_stream(&self) -> Result<ListenKey> {
        self.runtime.block_on(self.client.start_user_data_stream())
    }

    pub fn keep_alive_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.runtime
            .block_on(self.client.keep_alive_user_data_stream(listen_key))
    }

    pub fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.runtime
            .block_on(self.client.close_user_data_stream(listen_key))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::spot::{Credentials, Error};

    #[test]
    fn test_validation_errors_returned_synchronously() {
        let client = BlockingClient::new(Config::default()).unwrap();

        let err = client
            .new_order(NewOrder::market_sell("ETHBTC", dec!(1)))
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials(_)));

        let err = client.order_book("ETHBTC", Some(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_from_async_keeps_config() {
        let client = HttpClient::new(Config {
            credentials: Some(Credentials::api_key_only("key")),
            ..Default::default()
        })
        .unwrap();
        let blocking = BlockingClient::from_async(client).unwrap();
        assert!(blocking.inner().signer().credentials().is_some());
    }
}
