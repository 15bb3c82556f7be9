//! # binance-sdk
//!
//! A Rust SDK for the [Binance](https://www.binance.com) Spot REST and WebSocket APIs.
//!
//! ## Quick Navigation
//!
//! | Module | Description | Common Use Cases |
//! |--------|-------------|------------------|
//! | [`spot`] | Spot trading & data | Query markets, place orders, stream data |
//! | [`spot::http`] | Async HTTP client | Market data, account queries, order placement |
//! | [`spot::blocking`] | Blocking HTTP client | Scripts and non-async callers |
//! | [`spot::ws`] | WebSocket streaming | Real-time trades, klines, user data |
//! | [`spot::types`] | Type definitions | Orders, trades, candlesticks, subscriptions |
//! | [`spot::signing`] | Request signing | Parameter ordering, HMAC-SHA256 signatures |
//!
//! ## Features
//!
//! - Full Spot market data, account and order endpoints
//! - User data stream lifecycle and events
//! - Deterministic request signing with an injectable clock
//! - Async (`Send + 'static` futures) and blocking call modes
//! - Real-time market data via WebSocket subscriptions with automatic reconnection
//! - `binance.com` and `binance.us` domains
//!
//! ## Getting Started
//!
//! ### Your First Query
//!
//! ```no_run
//! use binance_sdk::spot;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = spot::com()?;
//!     let ticker = client.ticker_24h("BTCUSDT").await?;
//!     println!("BTCUSDT: {} ({}%)", ticker.last_price, ticker.price_change_percent);
//!     Ok(())
//! }
//! ```
//!
//! ### Placing an Order
//!
//! ```no_run
//! use binance_sdk::spot::{self, Config, Credentials, types::*};
//! use rust_decimal::dec;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = spot::HttpClient::new(Config {
//!     credentials: Some(Credentials::new("api_key", "api_secret")),
//!     recv_window: Some(5_000),
//!     ..Default::default()
//! })?;
//!
//! let order = NewOrder::limit_sell("BNBUSDT", TimeInForce::Gtc, dec!(0.5), dec!(900));
//! client.new_order_test(order.clone()).await?;
//! let resp = client.new_order(order).await?;
//! println!("placed {}", resp.order_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture Decisions
//!
//! ### `impl Future` instead of `async fn`
//!
//! Endpoints return `impl Future<Output = Result<...>> + Send + 'static`. Arguments
//! are validated and the request is signed before the future is returned, so the
//! future owns everything it needs:
//!
//! ```ignore
//! tokio::spawn(client.account());
//! ```
//!
//! ### Insertion-ordered parameters
//!
//! The exchange verifies the signature against the exact query string, so
//! [`spot::Params`] keeps parameters in insertion order and the transmitted
//! query is byte-for-byte the signed payload followed by `signature`.
//!
//! ### High-Precision Decimals
//!
//! All prices and quantities use [`rust_decimal::Decimal`], parsed from the
//! string representation the API sends.
//!
//! ## Examples
//!
//! The `demos/` directory contains runnable examples covering market data,
//! account balances, order placement, WebSocket streams and user data streams.

pub mod spot;

/// Re-exported decimal type from rust_decimal.
///
/// Used for prices and quantities.
pub use rust_decimal::{Decimal, dec};
