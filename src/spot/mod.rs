//! Binance Spot REST and WebSocket APIs.
//!
//! This module provides typed access to Binance Spot market data, account
//! queries, order management and user data streams.
//!
//! # Components
//!
//! - [`HttpClient`]: async REST client, every endpoint returns a `Send + 'static` future
//! - [`BlockingClient`]: same surface, blocks the calling thread
//! - [`WebSocket`]: stream connection with automatic reconnection
//! - [`signing`]: parameter ordering and HMAC-SHA256 request signing
//! - [`types`]: request and response models
//!
//! # Examples
//!
//! ## Query Market Data
//!
//! ```no_run
//! use binance_sdk::spot::{self, types::CandlestickInterval};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = spot::com()?;
//!
//! let book = client.order_book("BTCUSDT", Some(5)).await?;
//! println!("spread: {:?}", book.spread());
//!
//! let bars = client
//!     .candlesticks("BTCUSDT", CandlestickInterval::Hourly, Some(24), None, None)
//!     .await?;
//! for bar in bars {
//!     println!("{} O:{} C:{}", bar.open_time, bar.open, bar.close);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## WebSocket Market Data
//!
//! ```no_run
//! use binance_sdk::spot::{self, types::*};
//! use futures::StreamExt;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut ws = spot::com()?.websocket();
//! ws.subscribe(Subscription::AggTrade { symbol: "BTCUSDT".into() });
//!
//! while let Some(msg) = ws.next().await {
//!     if let Incoming::Event(Event::AggTrade(trade)) = msg {
//!         println!("{} @ {}", trade.qty, trade.price);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Place Orders
//!
//! ```no_run
//! use binance_sdk::spot::{self, Config, Credentials, types::*};
//! use rust_decimal::dec;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = spot::HttpClient::new(Config {
//!     credentials: Credentials::from_env(),
//!     ..Default::default()
//! })?;
//!
//! let order = NewOrder::limit_buy("LTCBTC", TimeInForce::Gtc, dec!(1), dec!(0.1));
//! let resp = client.new_order(order).await?;
//! println!("order {} is {:?}", resp.order_id, resp.status);
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod error;
pub mod http;
pub mod signing;
pub mod types;
mod utils;
pub mod ws;

use std::time::Duration;

/// Re-export of the blocking client.
pub use blocking::BlockingClient;
/// Re-export error types.
pub use error::{Error, Result};
/// Re-export of the async HTTP client.
pub use http::Client as HttpClient;
/// Re-export signing primitives.
pub use signing::{Clock, Credentials, FixedClock, Params, RequestSigner, Security, SystemClock};
use url::Url;
/// Re-export of the WebSocket connection.
pub use ws::Connection as WebSocket;

/// Top-level domain of the exchange deployment.
///
/// Binance.US runs the same API under a separate domain with its own
/// accounts and listings.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Domain {
    /// `binance.com`
    #[default]
    #[display("com")]
    Com,
    /// `binance.us`
    #[display("us")]
    Us,
}

impl Domain {
    /// Returns the REST API base URL for this domain.
    ///
    /// - `Com`: `https://api.binance.com`
    /// - `Us`: `https://api.binance.us`
    pub fn api_url(&self) -> Url {
        let host = match self {
            Self::Com => "https://api.binance.com",
            Self::Us => "https://api.binance.us",
        };
        Url::parse(host).expect("static url")
    }

    /// Returns the WebSocket stream base URL for this domain.
    ///
    /// - `Com`: `wss://stream.binance.com:9443/ws`
    /// - `Us`: `wss://stream.binance.us:9443/ws`
    pub fn stream_url(&self) -> Url {
        let host = match self {
            Self::Com => "wss://stream.binance.com:9443/ws",
            Self::Us => "wss://stream.binance.us:9443/ws",
        };
        Url::parse(host).expect("static url")
    }
}

impl std::str::FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "com" => Ok(Self::Com),
            "us" => Ok(Self::Us),
            _ => Err(Error::invalid("domain", format!("unknown domain `{s}`"))),
        }
    }
}

/// Client configuration.
///
/// Replaces the family of factory overloads with a single struct; omitted
/// fields take their defaults.
///
/// # Example
///
/// ```
/// use binance_sdk::spot::{Config, Credentials, Domain, HttpClient};
///
/// let client = HttpClient::new(Config {
///     domain: Domain::Us,
///     credentials: Some(Credentials::new("key", "secret")),
///     recv_window: Some(5_000),
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(client.base_url().as_str(), "https://api.binance.us/");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Exchange deployment.
    pub domain: Domain,
    /// API credentials. Public endpoints work without them.
    pub credentials: Option<Credentials>,
    /// Default `recvWindow` in milliseconds for signed calls.
    pub recv_window: Option<u64>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Overrides the REST base URL, e.g. for a proxy or a local test server.
    pub base_url: Option<Url>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: Domain::Com,
            credentials: None,
            recv_window: None,
            timeout: Duration::from_secs(10),
            base_url: None,
        }
    }
}

impl Config {
    /// Default configuration with credentials read from the environment.
    ///
    /// See [`Credentials::from_env`].
    pub fn from_env() -> Self {
        Self {
            credentials: Credentials::from_env(),
            ..Default::default()
        }
    }
}

/// Creates a public client for `binance.com`.
///
/// # Example
///
/// ```
/// use binance_sdk::spot;
///
/// let client = spot::com().unwrap();
/// ```
#[inline(always)]
pub fn com() -> Result<HttpClient> {
    HttpClient::new(Config::default())
}

/// Creates a public client for `binance.us`.
#[inline(always)]
pub fn us() -> Result<HttpClient> {
    HttpClient::new(Config {
        domain: Domain::Us,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_urls() {
        assert_eq!(Domain::Com.api_url().as_str(), "https://api.binance.com/");
        assert_eq!(Domain::Us.api_url().as_str(), "https://api.binance.us/");
        assert_eq!(
            Domain::Com.stream_url().as_str(),
            "wss://stream.binance.com:9443/ws"
        );
        assert_eq!(
            Domain::Us.stream_url().as_str(),
            "wss://stream.binance.us:9443/ws"
        );
    }

    #[test]
    fn test_domain_parse() {
        assert_eq!("Com".parse::<Domain>().unwrap(), Domain::Com);
        assert_eq!("us".parse::<Domain>().unwrap(), Domain::Us);
        assert!("eu".parse::<Domain>().is_err());
        assert_eq!(Domain::Us.to_string(), "us");
        assert!(Domain::default().is_com());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.domain.is_com());
        assert!(config.credentials.is_none());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
