//! Async HTTP client for the Spot REST API.
//!
//! Every endpoint validates its arguments and signs the request when the
//! method is called, then returns a `Send + 'static` future that performs the
//! round trip. Validation failures therefore surface without touching the
//! network, and dropping the future cancels the in-flight request.
//!
//! # Examples
//!
//! ## Market Data
//!
//! ```no_run
//! use binance_sdk::spot;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = spot::com()?;
//! let prices = client.all_prices().await?;
//!
//! for ticker in prices.iter().filter(|t| t.symbol.ends_with("BTC")) {
//!     println!("{}: {}", ticker.symbol, ticker.price);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrent Calls
//!
//! ```no_run
//! use binance_sdk::spot;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = spot::com()?;
//!
//! // futures are 'static, so they can be spawned
//! let depth = tokio::spawn(client.order_book("ETHBTC", Some(10)));
//! let time = tokio::spawn(client.server_time());
//!
//! let (depth, time) = (depth.await??, time.await??);
//! println!("{} bids at {time}", depth.bids.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::Method;
use serde::{de::DeserializeOwned, de::IgnoredAny};
use url::Url;

use super::{
    Config, Domain,
    error::{Error, Result},
    signing::{API_KEY_HEADER, Clock, Params, RequestSigner, Security},
    types::{
        Account, AggTrade, AllOrdersRequest, ApiErrorBody, BookTicker, CancelOrderRequest,
        CancelOrderResponse, Candlestick, CandlestickInterval, ExchangeInfo, ListenKey,
        MAX_DEPTH_LIMIT, MAX_LIMIT, MyTrade, MyTradesRequest, NewOrder, NewOrderResponse,
        OpenOrdersRequest, Order, OrderBook, OrderStatusRequest, ServerTime, TickerPrice,
        TickerStatistics, Trade, check_limit, check_range, check_symbol,
    },
};

/// Longest window `aggTrades` accepts when both ends are given.
pub const MAX_AGG_TRADES_WINDOW: u64 = 24 * 60 * 60 * 1000;

/// HTTP client for the Spot REST API.
///
/// Cheap to clone; clones share the connection pool and configuration.
///
/// # Example
///
/// ```
/// use binance_sdk::spot::{Config, Credentials, HttpClient};
///
/// let client = HttpClient::new(Config {
///     credentials: Some(Credentials::new("key", "secret")),
///     ..Default::default()
/// })
/// .unwrap();
/// ```
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: Url,
    domain: Domain,
    signer: Arc<RequestSigner>,
}

impl Client {
    /// Creates a new client.
    ///
    /// The base URL follows `config.domain` unless `config.base_url` overrides it.
    pub fn new(config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .tcp_nodelay(true)
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| config.domain.api_url());
        let signer = RequestSigner::new(config.credentials).with_recv_window(config.recv_window);

        Ok(Self {
            http_client,
            base_url,
            domain: config.domain,
            signer: Arc::new(signer),
        })
    }

    /// Sets a custom base URL for this client.
    ///
    /// The domain is kept and still decides the WebSocket endpoint.
    pub fn with_url(self, base_url: Url) -> Self {
        Self { base_url, ..self }
    }

    /// Replaces the clock used for `timestamp`.
    pub fn with_clock(self, clock: impl Clock) -> Self {
        let signer = RequestSigner::clone(&self.signer).with_clock(clock);
        Self {
            signer: Arc::new(signer),
            ..self
        }
    }

    /// Returns the REST base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the domain this client is configured for.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns the request signer.
    #[must_use]
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Creates a WebSocket connection to this domain's stream endpoint.
    ///
    /// # Example
    ///
    /// ```
    /// use binance_sdk::spot::{self, types::Subscription};
    ///
    /// # async fn example() {
    /// let mut ws = spot::com().unwrap().websocket();
    /// ws.subscribe(Subscription::AllTickers);
    /// # }
    /// ```
    pub fn websocket(&self) -> super::WebSocket {
        super::WebSocket::new(self.domain.stream_url())
    }

    /// Tests connectivity.
    pub fn ping(&self) -> impl Future<Output = Result<()>> + Send + 'static {
        let future = self.request::<IgnoredAny>(
            Method::GET,
            "/api/v3/ping",
            Ok(Params::new()),
            Security::None,
            None,
        );
        async move { future.await.map(|_| ()) }
    }

    /// Returns the server time in milliseconds since the Unix epoch.
    pub fn server_time(&self) -> impl Future<Output = Result<u64>> + Send + 'static {
        let future = self.request::<ServerTime>(
            Method::GET,
            "/api/v3/time",
            Ok(Params::new()),
            Security::None,
            None,
        );
        async move { future.await.map(|time| time.server_time) }
    }

    /// Current exchange trading rules, rate limits and symbol information.
    pub fn exchange_info(&self) -> impl Future<Output = Result<ExchangeInfo>> + Send + 'static {
        self.public("/api/v3/exchangeInfo", Ok(Params::new()))
    }

    /// Order book snapshot.
    ///
    /// `limit` defaults to 100 on the server and must be within `1..=5000`.
    pub fn order_book(
        &self,
        symbol: &str,
        limit: Option<u16>,
    ) -> impl Future<Output = Result<OrderBook>> + Send + 'static {
        let params = check_symbol(symbol)
            .and_then(|_| check_limit(limit, MAX_DEPTH_LIMIT))
            .map(|_| {
                let mut params = Params::new();
                params.push("symbol", symbol).push_opt("limit", limit);
                params
            });
        self.public("/api/v3/depth", params)
    }

    /// Recent trades, up to `limit` (default 500, max 1000).
    pub fn trades(
        &self,
        symbol: &str,
        limit: Option<u16>,
    ) -> impl Future<Output = Result<Vec<Trade>>> + Send + 'static {
        let params = check_symbol(symbol)
            .and_then(|_| check_limit(limit, MAX_LIMIT))
            .map(|_| {
                let mut params = Params::new();
                params.push("symbol", symbol).push_opt("limit", limit);
                params
            });
        self.public("/api/v3/trades", params)
    }

    /// Older trades, starting from `from_id` when given. Requires an API key.
    pub fn historical_trades(
        &self,
        symbol: &str,
        limit: Option<u16>,
        from_id: Option<u64>,
    ) -> impl Future<Output = Result<Vec<Trade>>> + Send + 'static {
        let params = check_symbol(symbol)
            .and_then(|_| check_limit(limit, MAX_LIMIT))
            .map(|_| {
                let mut params = Params::new();
                params
                    .push("symbol", symbol)
                    .push_opt("limit", limit)
                    .push_opt("fromId", from_id);
                params
            });
        self.request(
            Method::GET,
            "/api/v3/historicalTrades",
            params,
            Security::ApiKey,
            None,
        )
    }

    /// Compressed/aggregate trades.
    ///
    /// When both `start_time` and `end_time` are given they must be at most
    /// 24 hours apart and `limit` must be omitted.
    pub fn agg_trades(
        &self,
        symbol: &str,
        from_id: Option<u64>,
        limit: Option<u16>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> impl Future<Output = Result<Vec<AggTrade>>> + Send + 'static {
        let params = check_agg_trades(symbol, limit, start_time, end_time).map(|_| {
            let mut params = Params::new();
            params
                .push("symbol", symbol)
                .push_opt("fromId", from_id)
                .push_opt("limit", limit)
                .push_opt("startTime", start_time)
                .push_opt("endTime", end_time);
            params
        });
        self.public("/api/v3/aggTrades", params)
    }

    /// Kline/candlestick bars, oldest first.
    pub fn candlesticks(
        &self,
        symbol: &str,
        interval: CandlestickInterval,
        limit: Option<u16>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> impl Future<Output = Result<Vec<Candlestick>>> + Send + 'static {
        let params = check_symbol(symbol)
            .and_then(|_| check_limit(limit, MAX_LIMIT))
            .and_then(|_| check_range(start_time, end_time))
            .map(|_| {
                let mut params = Params::new();
                params
                    .push("symbol", symbol)
                    .push("interval", interval)
                    .push_opt("limit", limit)
                    .push_opt("startTime", start_time)
                    .push_opt("endTime", end_time);
                params
            });
        self.public("/api/v3/klines", params)
    }

    /// 24 hour price change statistics for one symbol.
    pub fn ticker_24h(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<TickerStatistics>> + Send + 'static {
        self.public("/api/v3/ticker/24hr", symbol_params(symbol))
    }

    /// 24 hour price change statistics for every symbol.
    pub fn all_tickers_24h(
        &self,
    ) -> impl Future<Output = Result<Vec<TickerStatistics>>> + Send + 'static {
        self.public("/api/v3/ticker/24hr", Ok(Params::new()))
    }

    /// Latest price for one symbol.
    pub fn price(&self, symbol: &str) -> impl Future<Output = Result<TickerPrice>> + Send + 'static {
        self.public("/api/v3/ticker/price", symbol_params(symbol))
    }

    /// Latest price for every symbol.
    pub fn all_prices(&self) -> impl Future<Output = Result<Vec<TickerPrice>>> + Send + 'static {
        self.public("/api/v3/ticker/price", Ok(Params::new()))
    }

    /// Best price/quantity on the order book for one symbol.
    pub fn book_ticker(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<BookTicker>> + Send + 'static {
        self.public("/api/v3/ticker/bookTicker", symbol_params(symbol))
    }

    /// Best price/quantity on the order book for every symbol.
    pub fn book_tickers(&self) -> impl Future<Output = Result<Vec<BookTicker>>> + Send + 'static {
        self.public("/api/v3/ticker/bookTicker", Ok(Params::new()))
    }

    /// Sends a new order.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use binance_sdk::spot::{self, Config, types::*};
    /// use rust_decimal::dec;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = spot::HttpClient::new(Config::from_env())?;
    ///
    /// let order = NewOrder::market_buy("BNBUSDT", dec!(0.1))
    ///     .with_response_type(NewOrderResponseType::Full);
    /// let resp = client.new_order(order).await?;
    /// for fill in resp.fills {
    ///     println!("{} @ {}", fill.qty, fill.price);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_order(
        &self,
        order: NewOrder,
    ) -> impl Future<Output = Result<NewOrderResponse>> + Send + 'static {
        self.signed(Method::POST, "/api/v3/order", order.params(), order.recv_window)
    }

    /// Validates a new order without sending it to the matching engine.
    pub fn new_order_test(&self, order: NewOrder) -> impl Future<Output = Result<()>> + Send + 'static {
        let future = self.signed::<IgnoredAny>(
            Method::POST,
            "/api/v3/order/test",
            order.params(),
            order.recv_window,
        );
        async move { future.await.map(|_| ()) }
    }

    /// Checks an order's status.
    pub fn order_status(
        &self,
        req: OrderStatusRequest,
    ) -> impl Future<Output = Result<Order>> + Send + 'static {
        self.signed(Method::GET, "/api/v3/order", req.params(), req.recv_window)
    }

    /// Cancels an active order.
    pub fn cancel_order(
        &self,
        req: CancelOrderRequest,
    ) -> impl Future<Output = Result<CancelOrderResponse>> + Send + 'static {
        self.signed(Method::DELETE, "/api/v3/order", req.params(), req.recv_window)
    }

    /// Open orders, for one symbol or all of them.
    pub fn open_orders(
        &self,
        req: OpenOrdersRequest,
    ) -> impl Future<Output = Result<Vec<Order>>> + Send + 'static {
        self.signed(Method::GET, "/api/v3/openOrders", req.params(), req.recv_window)
    }

    /// All orders of a symbol: active, canceled or filled.
    pub fn all_orders(
        &self,
        req: AllOrdersRequest,
    ) -> impl Future<Output = Result<Vec<Order>>> + Send + 'static {
        self.signed(Method::GET, "/api/v3/allOrders", req.params(), req.recv_window)
    }

    /// Current account information.
    pub fn account(&self) -> impl Future<Output = Result<Account>> + Send + 'static {
        self.account_with(None, None)
    }

    /// Current account information with an explicit `recvWindow` and/or `timestamp`.
    pub fn account_with(
        &self,
        recv_window: Option<u64>,
        timestamp: Option<u64>,
    ) -> impl Future<Output = Result<Account>> + Send + 'static {
        let mut params = Params::new();
        params.push_opt("timestamp", timestamp);
        self.signed(Method::GET, "/api/v3/account", Ok(params), recv_window)
    }

    /// Trades for a specific account and symbol.
    pub fn my_trades(
        &self,
        req: MyTradesRequest,
    ) -> impl Future<Output = Result<Vec<MyTrade>>> + Send + 'static {
        self.signed(Method::GET, "/api/v3/myTrades", req.params(), req.recv_window)
    }

    /// Starts a user data stream and returns its listen key.
    ///
    /// The stream closes after 60 minutes unless kept alive.
    pub fn start_user_data_stream(&self) -> impl Future<Output = Result<ListenKey>> + Send + 'static {
        self.request(
            Method::POST,
            "/api/v3/userDataStream",
            Ok(Params::new()),
            Security::ApiKey,
            None,
        )
    }

    /// Extends a user data stream by 60 minutes. Call roughly every 30 minutes.
    pub fn keep_alive_user_data_stream(
        &self,
        listen_key: &str,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        self.user_data_stream(Method::PUT, listen_key)
    }

    /// Closes a user data stream.
    pub fn close_user_data_stream(
        &self,
        listen_key: &str,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        self.user_data_stream(Method::DELETE, listen_key)
    }

    fn user_data_stream(
        &self,
        method: Method,
        listen_key: &str,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        let params = if listen_key.is_empty() {
            Err(Error::invalid("listenKey", "must not be empty"))
        } else {
            Ok(Params::from_iter([("listenKey", listen_key)]))
        };
        let future = self.request::<IgnoredAny>(
            method,
            "/api/v3/userDataStream",
            params,
            Security::ApiKey,
            None,
        );
        async move { future.await.map(|_| ()) }
    }

    #[inline(always)]
    fn public<T>(
        &self,
        path: &'static str,
        params: Result<Params>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.request(Method::GET, path, params, Security::None, None)
    }

    #[inline(always)]
    fn signed<T>(
        &self,
        method: Method,
        path: &'static str,
        params: Result<Params>,
        recv_window: Option<u64>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.request(method, path, params, Security::Signed, recv_window)
    }

    /// Prepares the request eagerly and returns the round trip as a future.
    fn request<T>(
        &self,
        method: Method,
        path: &'static str,
        params: Result<Params>,
        security: Security,
        recv_window: Option<u64>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let prepared =
            params.and_then(|params| self.prepare(method, path, params, security, recv_window));
        async move {
            let resp = prepared?.send().await?;
            parse_response(resp).await
        }
    }

    fn prepare(
        &self,
        method: Method,
        path: &str,
        params: Params,
        security: Security,
        recv_window: Option<u64>,
    ) -> Result<reqwest::RequestBuilder> {
        let signed = self.signer.sign(params, security, recv_window)?;

        let mut url = self.base_url.clone();
        url.set_path(path);
        let query = signed.query();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        log::debug!("{method} {path} security={security}");

        let mut builder = self.http_client.request(method, url);
        if let Some(api_key) = signed.api_key() {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        Ok(builder)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("domain", &self.domain)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

fn symbol_params(symbol: &str) -> Result<Params> {
    check_symbol(symbol)?;
    Ok(Params::from_iter([("symbol", symbol)]))
}

fn check_agg_trades(
    symbol: &str,
    limit: Option<u16>,
    start_time: Option<u64>,
    end_time: Option<u64>,
) -> Result<()> {
    check_symbol(symbol)?;
    check_limit(limit, MAX_LIMIT)?;
    check_range(start_time, end_time)?;

    if let (Some(start), Some(end)) = (start_time, end_time) {
        if limit.is_some() {
            return Err(Error::invalid(
                "limit",
                "must be omitted when both startTime and endTime are set",
            ));
        }
        if end - start > MAX_AGG_TRADES_WINDOW {
            return Err(Error::invalid(
                "endTime",
                "startTime and endTime must be at most 24 hours apart",
            ));
        }
    }
    Ok(())
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        let (code, msg) = match serde_json::from_slice::<ApiErrorBody>(&body) {
            Ok(err) => (err.code, err.msg),
            Err(_) => (0, String::from_utf8_lossy(&body).into_owned()),
        };
        log::debug!("api error {code} (http {status}): {msg}");
        return Err(Error::Api { status, code, msg });
    }

    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use either::Either;
    use rust_decimal::dec;

    use super::*;
    use crate::spot::{Credentials, FixedClock, signing::MAX_RECV_WINDOW, utils::parse_query};

    const SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
    const TIMESTAMP: u64 = 1_499_827_319_559;

    fn client() -> Client {
        Client::new(Config {
            credentials: Some(Credentials::new(API_KEY, SECRET)),
            ..Default::default()
        })
        .unwrap()
        .with_clock(FixedClock(TIMESTAMP))
    }

    fn build(
        client: &Client,
        method: Method,
        path: &str,
        params: Params,
        security: Security,
        recv_window: Option<u64>,
    ) -> reqwest::Request {
        client
            .prepare(method, path, params, security, recv_window)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_signed_market_order() {
        let order = NewOrder::market_buy("ETHBTC", dec!(1));
        let req = build(
            &client(),
            Method::POST,
            "/api/v3/order",
            order.params().unwrap(),
            Security::Signed,
            None,
        );

        assert_eq!(*req.method(), Method::POST);
        assert_eq!(req.url().path(), "/api/v3/order");
        assert_eq!(
            req.url().query(),
            Some(
                "symbol=ETHBTC&side=BUY&type=MARKET&quantity=1&timestamp=1499827319559&signature=89d31e5c34e4134d0a6c056e202c2fff86043ff365cfc4643573ece94dfcbd97"
            )
        );
        assert_eq!(req.headers()[API_KEY_HEADER], API_KEY);
    }

    #[test]
    fn test_signed_with_recv_window() {
        let req = OpenOrdersRequest {
            recv_window: Some(5_000),
            ..OpenOrdersRequest::new("ETHBTC")
        };
        let req = build(
            &client(),
            Method::GET,
            "/api/v3/openOrders",
            req.params().unwrap(),
            Security::Signed,
            req.recv_window,
        );
        assert_eq!(
            req.url().query(),
            Some(
                "symbol=ETHBTC&timestamp=1499827319559&recvWindow=5000&signature=43897182eec922ca6e73afecd85df0056c7b09e94997b28ddd704a410696c9bf"
            )
        );
    }

    #[test]
    fn test_account_only_timestamp() {
        let req = build(
            &client(),
            Method::GET,
            "/api/v3/account",
            Params::new(),
            Security::Signed,
            None,
        );
        assert_eq!(
            req.url().query(),
            Some(
                "timestamp=1499827319559&signature=2222d49722f6af5da13f6da6bfc0d7de19ca2815ebc98bbc49e4942268472f3f"
            )
        );
    }

    #[test]
    fn test_public_request_unsigned() {
        let mut params = Params::new();
        params.push("symbol", "ETHBTC").push("limit", 10);
        let req = build(
            &client(),
            Method::GET,
            "/api/v3/depth",
            params,
            Security::None,
            None,
        );
        assert_eq!(req.url().query(), Some("symbol=ETHBTC&limit=10"));
        assert!(req.headers().get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn test_query_on_the_wire_equals_signed_query() {
        let client = client();
        let req = CancelOrderRequest::new("LTCBTC", Either::Right("web:order/1.a-b_C".into()));
        let params = req.params().unwrap();

        let signed = client
            .signer()
            .sign(params.clone(), Security::Signed, None)
            .unwrap();
        let req = build(
            &client,
            Method::DELETE,
            "/api/v3/order",
            params,
            Security::Signed,
            None,
        );
        assert_eq!(req.url().query(), Some(signed.query().as_str()));

        let keys: Vec<_> = parse_query(req.url().query().unwrap())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["symbol", "origClientOrderId", "timestamp", "signature"]);
    }

    #[tokio::test]
    async fn test_values_cannot_inject_parameters() {
        let client = client();

        let err = client
            .cancel_order(CancelOrderRequest::new(
                "ETHBTC",
                Either::Right("x&symbol=BNBBTC".into()),
            ))
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidParameter { ref name, .. } if name == "origClientOrderId")
        );

        let err = client
            .new_order(
                NewOrder::market_buy("ETHBTC", dec!(1)).with_new_client_order_id("a b\"#<x>"),
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidParameter { ref name, .. } if name == "newClientOrderId")
        );

        let err = client.price("ETHBTC&limit=1").await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "symbol"));
    }

    #[test]
    fn test_base_url_override() {
        let client = Client::new(Config {
            base_url: Some("http://127.0.0.1:9999".parse().unwrap()),
            ..Default::default()
        })
        .unwrap();
        let req = build(
            &client,
            Method::GET,
            "/api/v3/ping",
            Params::new(),
            Security::None,
            None,
        );
        assert_eq!(req.url().as_str(), "http://127.0.0.1:9999/api/v3/ping");
        assert!(client.domain().is_com());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let client = Client::new(Config::default()).unwrap();

        let err = client.account().await.unwrap_err();
        assert!(matches!(err, Error::MissingCredentials(_)));

        let err = client.start_user_data_stream().await.unwrap_err();
        assert!(matches!(err, Error::MissingCredentials("api key")));

        let client = Client::new(Config {
            credentials: Some(Credentials::api_key_only(API_KEY)),
            ..Default::default()
        })
        .unwrap();
        let err = client
            .new_order(NewOrder::market_buy("ETHBTC", dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials("api secret")));
    }

    #[tokio::test]
    async fn test_invalid_parameters() {
        let client = client();

        let err = client.order_book("ETHBTC", Some(5_001)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "limit"));

        let err = client.trades("", None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "symbol"));

        let err = client
            .candlesticks("ETHBTC", CandlestickInterval::Daily, Some(0), None, None)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = client
            .new_order(NewOrder::market_buy("ETHBTC", dec!(1)).with_recv_window(MAX_RECV_WINDOW + 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "recvWindow"));

        let err = client.close_user_data_stream("").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_agg_trades_constraints() {
        let hour = 60 * 60 * 1000;
        assert!(check_agg_trades("ETHBTC", Some(500), None, None).is_ok());
        assert!(check_agg_trades("ETHBTC", Some(500), Some(0), None).is_ok());
        assert!(check_agg_trades("ETHBTC", None, Some(0), Some(24 * hour)).is_ok());

        let err = check_agg_trades("ETHBTC", Some(10), Some(0), Some(hour)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "limit"));

        let err = check_agg_trades("ETHBTC", None, Some(0), Some(24 * hour + 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "endTime"));

        assert!(check_agg_trades("ETHBTC", None, Some(hour), Some(0)).is_err());
        assert!(check_agg_trades("ETHBTC", Some(1001), None, None).is_err());
    }
}
