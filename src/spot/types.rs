//! Spot API type definitions.
//!
//! # Core Components
//!
//! ## Wire enumerations
//! - [`CandlestickInterval`]: kline interval codes (`1m`, `1h`, `1M`, ...)
//! - [`OrderSide`], [`OrderType`], [`TimeInForce`], [`OrderStatus`]
//! - [`NewOrderResponseType`], [`ExecutionType`], [`RateLimitType`], [`SymbolStatus`]
//!
//! Every enumeration maps to a fixed wire string through `Display` and parses
//! back through `FromStr`; unknown codes are rejected with
//! [`Error::InvalidParameter`](super::Error::InvalidParameter).
//!
//! ## Market data
//! - [`OrderBook`], [`Trade`], [`AggTrade`], [`Candlestick`]
//! - [`TickerStatistics`], [`TickerPrice`], [`BookTicker`]
//! - [`ExchangeInfo`], [`ServerTime`]
//!
//! ## Account
//! - [`NewOrder`] and the query/cancel request objects
//! - [`Account`], [`AssetBalance`], [`Order`], [`NewOrderResponse`], [`MyTrade`]
//! - [`ListenKey`]
//!
//! ## WebSocket
//! - [`Subscription`]: stream names to subscribe to
//! - [`Incoming`] / [`Event`]: frames received from the server
//!
//! Unknown JSON fields are ignored everywhere.

use std::{fmt, str::FromStr};

use either::Either;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::IgnoredAny};
use serde_with::skip_serializing_none;

use super::{
    error::{Error, Result},
    signing::Params,
    utils::to_params,
};

/// Parses a wire string through the type's serde mapping.
fn parse_wire<T: for<'de> Deserialize<'de>>(kind: &str, s: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
        .map_err(|_| Error::invalid(kind, format!("unknown value `{s}`")))
}

macro_rules! wire_from_str {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self> {
                    parse_wire($kind, s)
                }
            }
        )*
    };
}

wire_from_str! {
    OrderSide => "side",
    OrderType => "type",
    TimeInForce => "timeInForce",
    OrderStatus => "status",
    NewOrderResponseType => "newOrderRespType",
    ExecutionType => "executionType",
    RateLimitType => "rateLimitType",
    RateLimitInterval => "interval",
    SymbolStatus => "status",
}

/// Order side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

impl OrderType {
    fn needs_price(self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit | Self::LimitMaker
        )
    }

    fn needs_time_in_force(self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit
        )
    }

    fn needs_stop_price(self) -> bool {
        matches!(
            self,
            Self::StopLoss | Self::StopLossLimit | Self::TakeProfit | Self::TakeProfitLimit
        )
    }
}

/// How long an order stays active.
///
/// - `Gtc`: good till cancelled
/// - `Ioc`: immediate or cancel
/// - `Fok`: fill or kill
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}

/// Order lifecycle state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    PendingCancel,
    Rejected,
    Expired,
    ExpiredInMatch,
}

impl OrderStatus {
    /// Returns true once the order can no longer trade.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::New | Self::PartiallyFilled | Self::PendingCancel)
    }
}

/// Detail level of a new order response.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewOrderResponseType {
    Ack,
    Result,
    Full,
}

/// Execution type carried by user data `executionReport` events.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionType {
    New,
    Canceled,
    Replaced,
    Rejected,
    Trade,
    Expired,
    TradePrevention,
}

/// Rate limiters reported by `exchangeInfo`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitType {
    RequestWeight,
    Orders,
    RawRequests,
    Requests,
}

/// Rate limit window unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitInterval {
    Second,
    Minute,
    Day,
}

/// Trading status of a symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolStatus {
    PreTrading,
    Trading,
    PostTrading,
    EndOfDay,
    Halt,
    AuctionMatch,
    Break,
}

/// Kline/candlestick interval.
///
/// # Example
///
/// ```
/// use binance_sdk::spot::types::CandlestickInterval;
///
/// let interval = CandlestickInterval::FifteenMinutes;
/// assert_eq!(interval.to_string(), "15m");
///
/// let parsed: CandlestickInterval = "15m".parse().unwrap();
/// assert_eq!(parsed, CandlestickInterval::FifteenMinutes);
/// assert!("7m".parse::<CandlestickInterval>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum CandlestickInterval {
    #[serde(rename = "1s")]
    #[display("1s")]
    OneSecond,
    #[serde(rename = "1m")]
    #[display("1m")]
    OneMinute,
    #[serde(rename = "3m")]
    #[display("3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    #[display("5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    #[display("15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    #[display("30m")]
    HalfHourly,
    #[serde(rename = "1h")]
    #[display("1h")]
    Hourly,
    #[serde(rename = "2h")]
    #[display("2h")]
    TwoHourly,
    #[serde(rename = "4h")]
    #[display("4h")]
    FourHourly,
    #[serde(rename = "6h")]
    #[display("6h")]
    SixHourly,
    #[serde(rename = "8h")]
    #[display("8h")]
    EightHourly,
    #[serde(rename = "12h")]
    #[display("12h")]
    TwelveHourly,
    #[serde(rename = "1d")]
    #[display("1d")]
    Daily,
    #[serde(rename = "3d")]
    #[display("3d")]
    ThreeDaily,
    #[serde(rename = "1w")]
    #[display("1w")]
    Weekly,
    #[serde(rename = "1M")]
    #[display("1M")]
    Monthly,
}

impl FromStr for CandlestickInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1s" => Ok(Self::OneSecond),
            "1m" => Ok(Self::OneMinute),
            "3m" => Ok(Self::ThreeMinutes),
            "5m" => Ok(Self::FiveMinutes),
            "15m" => Ok(Self::FifteenMinutes),
            "30m" => Ok(Self::HalfHourly),
            "1h" => Ok(Self::Hourly),
            "2h" => Ok(Self::TwoHourly),
            "4h" => Ok(Self::FourHourly),
            "6h" => Ok(Self::SixHourly),
            "8h" => Ok(Self::EightHourly),
            "12h" => Ok(Self::TwelveHourly),
            "1d" => Ok(Self::Daily),
            "3d" => Ok(Self::ThreeDaily),
            "1w" => Ok(Self::Weekly),
            "1M" => Ok(Self::Monthly),
            _ => Err(Error::invalid(
                "interval",
                format!("unknown candlestick interval `{s}`"),
            )),
        }
    }
}

/// Server time.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Milliseconds since the Unix epoch.
    pub server_time: u64,
}

/// Exchange trading rules and symbol information.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub timezone: String,
    pub server_time: u64,
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    /// Looks up a symbol.
    #[must_use]
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|info| info.symbol == symbol)
    }
}

/// A single rate limiter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub rate_limit_type: RateLimitType,
    pub interval: RateLimitInterval,
    #[serde(default = "one")]
    pub interval_num: u32,
    pub limit: u32,
}

fn one() -> u32 {
    1
}

/// Symbol metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: SymbolStatus,
    pub base_asset: String,
    pub base_asset_precision: u32,
    pub quote_asset: String,
    #[serde(alias = "quotePrecision")]
    pub quote_asset_precision: u32,
    #[serde(default)]
    pub order_types: Vec<OrderType>,
    #[serde(default)]
    pub iceberg_allowed: bool,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    /// Raw filter objects (`PRICE_FILTER`, `LOT_SIZE`, ...).
    #[serde(default)]
    pub filters: Vec<serde_json::Value>,
}

/// Price level: `[price, quantity]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderBookEntry {
    pub price: Decimal,
    pub qty: Decimal,
}

/// Order book snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub last_update_id: u64,
    pub bids: Vec<OrderBookEntry>,
    pub asks: Vec<OrderBookEntry>,
}

impl OrderBook {
    /// Highest bid.
    #[must_use]
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.first()
    }

    /// Lowest ask.
    #[must_use]
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.first()
    }

    /// Best ask minus best bid.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}

/// Public trade.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub price: Decimal,
    pub qty: Decimal,
    #[serde(default)]
    pub quote_qty: Decimal,
    pub time: u64,
    pub is_buyer_maker: bool,
    #[serde(default)]
    pub is_best_match: bool,
}

/// Compressed/aggregate trade.
///
/// Trades that fill at the same time, from the same order, at the same price
/// are aggregated into one entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AggTrade {
    #[serde(rename = "a")]
    pub agg_trade_id: u64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub qty: Decimal,
    #[serde(rename = "f")]
    pub first_trade_id: u64,
    #[serde(rename = "l")]
    pub last_trade_id: u64,
    #[serde(rename = "T")]
    pub time: u64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
    #[serde(rename = "M", default)]
    pub is_best_match: bool,
}

/// Kline/candlestick bar, uniquely identified by its open time.
///
/// Sent on the wire as a positional array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCandlestick")]
pub struct Candlestick {
    pub open_time: u64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: u64,
    pub quote_asset_volume: Decimal,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: Decimal,
    pub taker_buy_quote_asset_volume: Decimal,
}

type RawCandlestick = (
    u64,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    u64,
    Decimal,
    u64,
    Decimal,
    Decimal,
    IgnoredAny,
);

impl From<RawCandlestick> for Candlestick {
    fn from(raw: RawCandlestick) -> Self {
        let (
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_asset_volume,
            number_of_trades,
            taker_buy_base_asset_volume,
            taker_buy_quote_asset_volume,
            _,
        ) = raw;
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_asset_volume,
            number_of_trades,
            taker_buy_base_asset_volume,
            taker_buy_quote_asset_volume,
        }
    }
}

/// 24 hour rolling window price change statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerStatistics {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Decimal,
    #[serde(default)]
    pub prev_close_price: Decimal,
    pub last_price: Decimal,
    #[serde(default)]
    pub last_qty: Decimal,
    #[serde(default)]
    pub bid_price: Decimal,
    #[serde(default)]
    pub bid_qty: Decimal,
    #[serde(default)]
    pub ask_price: Decimal,
    #[serde(default)]
    pub ask_qty: Decimal,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: u64,
    pub close_time: u64,
    pub first_id: i64,
    pub last_id: i64,
    pub count: u64,
}

/// Latest price for a symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: Decimal,
}

/// Best price/quantity on the order book.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    pub symbol: String,
    pub bid_price: Decimal,
    pub bid_qty: Decimal,
    pub ask_price: Decimal,
    pub ask_qty: Decimal,
}

/// Account snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub maker_commission: u32,
    pub taker_commission: u32,
    pub buyer_commission: u32,
    pub seller_commission: u32,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    #[serde(default)]
    pub update_time: u64,
    #[serde(default)]
    pub account_type: String,
    pub balances: Vec<AssetBalance>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Account {
    /// Returns the balance for `asset`, or a zero balance if the account holds none.
    #[must_use]
    pub fn balance(&self, asset: &str) -> AssetBalance {
        self.balances
            .iter()
            .find(|balance| balance.asset == asset)
            .cloned()
            .unwrap_or_else(|| AssetBalance {
                asset: asset.to_owned(),
                free: Decimal::ZERO,
                locked: Decimal::ZERO,
            })
    }

    /// Balances with a non-zero total.
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &AssetBalance> {
        self.balances.iter().filter(|balance| !balance.total().is_zero())
    }
}

/// Balance of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

impl AssetBalance {
    /// Free plus locked.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

/// Order as returned by the query endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default = "minus_one")]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub price: Decimal,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    #[serde(default)]
    pub cummulative_quote_qty: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub iceberg_qty: Decimal,
    #[serde(default)]
    pub time: u64,
    #[serde(default)]
    pub update_time: u64,
    #[serde(default)]
    pub is_working: bool,
}

fn minus_one() -> i64 {
    -1
}

/// Response to a new order.
///
/// With [`NewOrderResponseType::Ack`] only the identifiers are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default = "minus_one")]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub transact_time: u64,
    pub price: Option<Decimal>,
    pub orig_qty: Option<Decimal>,
    pub executed_qty: Option<Decimal>,
    pub cummulative_quote_qty: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub time_in_force: Option<TimeInForce>,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub side: Option<OrderSide>,
    #[serde(default)]
    pub fills: Vec<OrderFill>,
}

/// Fill attached to a `FULL` new order response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    pub price: Decimal,
    pub qty: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    #[serde(default)]
    pub trade_id: u64,
}

/// Response to an order cancellation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResponse {
    pub symbol: String,
    pub orig_client_order_id: String,
    pub order_id: u64,
    pub client_order_id: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    pub status: Option<OrderStatus>,
}

/// Trade executed by the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTrade {
    pub symbol: String,
    pub id: u64,
    pub order_id: u64,
    pub price: Decimal,
    pub qty: Decimal,
    #[serde(default)]
    pub quote_qty: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    pub time: u64,
    pub is_buyer: bool,
    pub is_maker: bool,
    #[serde(default)]
    pub is_best_match: bool,
}

/// Token identifying a live user data stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    pub listen_key: String,
}

impl fmt::Display for ListenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.listen_key)
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

/// New order parameters.
///
/// Use the constructors for the common cases and the `with_*` methods for the
/// optional fields. Mandatory fields per order type are checked before the
/// request is sent.
///
/// # Example
///
/// ```
/// use binance_sdk::spot::types::{NewOrder, TimeInForce};
/// use rust_decimal::dec;
///
/// let order = NewOrder::limit_buy("LTCBTC", TimeInForce::Gtc, dec!(1), dec!(0.1))
///     .with_new_client_order_id("my-order-1");
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Option<Decimal>,
    pub quote_order_qty: Option<Decimal>,
    pub price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    pub stop_price: Option<Decimal>,
    pub iceberg_qty: Option<Decimal>,
    pub new_order_resp_type: Option<NewOrderResponseType>,
    #[serde(skip)]
    pub recv_window: Option<u64>,
    #[serde(skip)]
    pub timestamp: Option<u64>,
}

impl NewOrder {
    fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            time_in_force: None,
            quantity: None,
            quote_order_qty: None,
            price: None,
            new_client_order_id: None,
            stop_price: None,
            iceberg_qty: None,
            new_order_resp_type: None,
            recv_window: None,
            timestamp: None,
        }
    }

    fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        time_in_force: TimeInForce,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            time_in_force: Some(time_in_force),
            quantity: Some(quantity),
            price: Some(price),
            ..Self::new(symbol, side, OrderType::Limit)
        }
    }

    fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::new(symbol, side, OrderType::Market)
        }
    }

    /// Limit buy.
    pub fn limit_buy(
        symbol: impl Into<String>,
        time_in_force: TimeInForce,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::limit(symbol, OrderSide::Buy, time_in_force, quantity, price)
    }

    /// Limit sell.
    pub fn limit_sell(
        symbol: impl Into<String>,
        time_in_force: TimeInForce,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::limit(symbol, OrderSide::Sell, time_in_force, quantity, price)
    }

    /// Market buy of `quantity` base asset.
    pub fn market_buy(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::market(symbol, OrderSide::Buy, quantity)
    }

    /// Market sell of `quantity` base asset.
    pub fn market_sell(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::market(symbol, OrderSide::Sell, quantity)
    }

    /// Generic constructor for the stop and take-profit order types.
    pub fn with_type(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self::new(symbol, side, order_type)
    }

    pub fn with_time_in_force(self, time_in_force: TimeInForce) -> Self {
        Self {
            time_in_force: Some(time_in_force),
            ..self
        }
    }

    pub fn with_quantity(self, quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..self
        }
    }

    /// Market orders only: spend (or receive) this much quote asset instead of a base quantity.
    pub fn with_quote_order_qty(self, quote_order_qty: Decimal) -> Self {
        Self {
            quote_order_qty: Some(quote_order_qty),
            quantity: None,
            ..self
        }
    }

    pub fn with_price(self, price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..self
        }
    }

    pub fn with_new_client_order_id(self, id: impl Into<String>) -> Self {
        Self {
            new_client_order_id: Some(id.into()),
            ..self
        }
    }

    pub fn with_stop_price(self, stop_price: Decimal) -> Self {
        Self {
            stop_price: Some(stop_price),
            ..self
        }
    }

    pub fn with_iceberg_qty(self, iceberg_qty: Decimal) -> Self {
        Self {
            iceberg_qty: Some(iceberg_qty),
            ..self
        }
    }

    pub fn with_response_type(self, resp_type: NewOrderResponseType) -> Self {
        Self {
            new_order_resp_type: Some(resp_type),
            ..self
        }
    }

    pub fn with_recv_window(self, recv_window: u64) -> Self {
        Self {
            recv_window: Some(recv_window),
            ..self
        }
    }

    /// Pins the request timestamp instead of reading the client clock.
    pub fn with_timestamp(self, timestamp: u64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self
        }
    }

    /// Checks the fields the order type makes mandatory.
    pub fn validate(&self) -> Result<()> {
        check_symbol(&self.symbol)?;

        let kind = self.order_type;
        let missing = |name: &str| Error::invalid(name, format!("is mandatory for {kind} orders"));

        if kind.needs_price() && self.price.is_none() {
            return Err(missing("price"));
        }
        if kind.needs_time_in_force() && self.time_in_force.is_none() {
            return Err(missing("timeInForce"));
        }
        if kind.needs_stop_price() && self.stop_price.is_none() {
            return Err(missing("stopPrice"));
        }
        match (kind, self.quantity, self.quote_order_qty) {
            (OrderType::Market, None, None) => Err(Error::invalid(
                "quantity",
                "MARKET orders need quantity or quoteOrderQty",
            )),
            (OrderType::Market, Some(_), Some(_)) => Err(Error::invalid(
                "quoteOrderQty",
                "cannot be combined with quantity",
            )),
            (OrderType::Market, ..) => Ok(()),
            (_, None, _) => Err(missing("quantity")),
            (_, Some(_), Some(_)) => Err(Error::invalid(
                "quoteOrderQty",
                format!("is only valid for MARKET orders, not {kind}"),
            )),
            _ => Ok(()),
        }
    }

    pub(super) fn params(&self) -> Result<Params> {
        self.validate()?;
        let mut params = to_params(self)?;
        params.push_opt("timestamp", self.timestamp);
        Ok(params)
    }
}

/// Order reference: exchange order id (`Left`) or original client order id (`Right`).
pub type OrderRef = Either<u64, String>;

fn push_order_ref(params: &mut Params, order: &OrderRef) {
    match order {
        Either::Left(order_id) => params.push("orderId", order_id),
        Either::Right(client_id) => params.push("origClientOrderId", client_id),
    };
}

/// Query a single order.
#[derive(Debug, Clone)]
pub struct OrderStatusRequest {
    pub symbol: String,
    pub order: OrderRef,
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl OrderStatusRequest {
    pub fn new(symbol: impl Into<String>, order: OrderRef) -> Self {
        Self {
            symbol: symbol.into(),
            order,
            recv_window: None,
            timestamp: None,
        }
    }

    pub(super) fn params(&self) -> Result<Params> {
        check_symbol(&self.symbol)?;
        let mut params = Params::new();
        params.push("symbol", &self.symbol);
        push_order_ref(&mut params, &self.order);
        params.push_opt("timestamp", self.timestamp);
        Ok(params)
    }
}

/// Cancel an active order.
#[derive(Debug, Clone)]
pub struct CancelOrderRequest {
    pub symbol: String,
    pub order: OrderRef,
    /// Client id assigned to the cancellation itself.
    pub new_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl CancelOrderRequest {
    pub fn new(symbol: impl Into<String>, order: OrderRef) -> Self {
        Self {
            symbol: symbol.into(),
            order,
            new_client_order_id: None,
            recv_window: None,
            timestamp: None,
        }
    }

    pub(super) fn params(&self) -> Result<Params> {
        check_symbol(&self.symbol)?;
        let mut params = Params::new();
        params.push("symbol", &self.symbol);
        push_order_ref(&mut params, &self.order);
        params.push_opt("newClientOrderId", self.new_client_order_id.as_ref());
        params.push_opt("timestamp", self.timestamp);
        Ok(params)
    }
}

/// Open orders, for one symbol or for all of them.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrdersRequest {
    pub symbol: Option<String>,
    #[serde(skip)]
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl OpenOrdersRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    /// Every symbol. Much heavier in request weight.
    pub fn all() -> Self {
        Self::default()
    }

    pub(super) fn params(&self) -> Result<Params> {
        if let Some(symbol) = &self.symbol {
            check_symbol(symbol)?;
        }
        to_params(self)
    }
}

/// All orders of a symbol: active, canceled or filled.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllOrdersRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub limit: Option<u16>,
    #[serde(skip)]
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl AllOrdersRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            start_time: None,
            end_time: None,
            limit: None,
            recv_window: None,
            timestamp: None,
        }
    }

    pub fn with_limit(self, limit: u16) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    pub(super) fn params(&self) -> Result<Params> {
        check_symbol(&self.symbol)?;
        check_limit(self.limit, MAX_LIMIT)?;
        check_range(self.start_time, self.end_time)?;
        to_params(self)
    }
}

/// Account trade history for a symbol.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTradesRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub from_id: Option<u64>,
    pub limit: Option<u16>,
    #[serde(skip)]
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl MyTradesRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            start_time: None,
            end_time: None,
            from_id: None,
            limit: None,
            recv_window: None,
            timestamp: None,
        }
    }

    pub fn with_limit(self, limit: u16) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    pub(super) fn params(&self) -> Result<Params> {
        check_symbol(&self.symbol)?;
        check_limit(self.limit, MAX_LIMIT)?;
        check_range(self.start_time, self.end_time)?;
        to_params(self)
    }
}

/// Default maximum for `limit` on list endpoints.
pub const MAX_LIMIT: u16 = 1000;

/// Maximum order book depth.
pub const MAX_DEPTH_LIMIT: u16 = 5000;

pub(super) fn check_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(Error::invalid("symbol", "must not be empty"));
    }
    Ok(())
}

pub(super) fn check_limit(limit: Option<u16>, max: u16) -> Result<()> {
    match limit {
        Some(limit) if limit == 0 || limit > max => Err(Error::invalid(
            "limit",
            format!("must be within 1..={max}, got {limit}"),
        )),
        _ => Ok(()),
    }
}

pub(super) fn check_range(start_time: Option<u64>, end_time: Option<u64>) -> Result<()> {
    match (start_time, end_time) {
        (Some(start), Some(end)) if start > end => Err(Error::invalid(
            "startTime",
            format!("must not be after endTime ({start} > {end})"),
        )),
        _ => Ok(()),
    }
}

/// WebSocket command sent to the server.
#[derive(Debug, Clone, Serialize)]
pub struct Outgoing {
    pub method: Method,
    pub params: Vec<String>,
    pub id: u64,
}

/// WebSocket command method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Method {
    Subscribe,
    Unsubscribe,
}

/// WebSocket stream subscription.
///
/// `Display` renders the stream name sent with `SUBSCRIBE`; symbols are
/// lowercased as the stream API requires.
///
/// | Subscription | Stream name | Incoming |
/// |---|---|---|
/// | [`AggTrade`](Self::AggTrade) | `<symbol>@aggTrade` | [`Event::AggTrade`] |
/// | [`Trade`](Self::Trade) | `<symbol>@trade` | [`Event::Trade`] |
/// | [`Candlestick`](Self::Candlestick) | `<symbol>@kline_<interval>` | [`Event::Candlestick`] |
/// | [`Depth`](Self::Depth) | `<symbol>@depth` | [`Event::Depth`] |
/// | [`Ticker`](Self::Ticker) | `<symbol>@ticker` | [`Event::Ticker`] |
/// | [`AllTickers`](Self::AllTickers) | `!ticker@arr` | [`Incoming::Tickers`] |
/// | [`BookTicker`](Self::BookTicker) | `<symbol>@bookTicker` | [`Incoming::BookTicker`] |
/// | [`UserData`](Self::UserData) | `<listen key>` | account, balance and execution events |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subscription {
    AggTrade { symbol: String },
    Trade { symbol: String },
    Candlestick { symbol: String, interval: CandlestickInterval },
    Depth { symbol: String },
    Ticker { symbol: String },
    AllTickers,
    BookTicker { symbol: String },
    UserData { listen_key: String },
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AggTrade { symbol } => write!(f, "{}@aggTrade", symbol.to_lowercase()),
            Self::Trade { symbol } => write!(f, "{}@trade", symbol.to_lowercase()),
            Self::Candlestick { symbol, interval } => {
                write!(f, "{}@kline_{interval}", symbol.to_lowercase())
            }
            Self::Depth { symbol } => write!(f, "{}@depth", symbol.to_lowercase()),
            Self::Ticker { symbol } => write!(f, "{}@ticker", symbol.to_lowercase()),
            Self::AllTickers => f.write_str("!ticker@arr"),
            Self::BookTicker { symbol } => write!(f, "{}@bookTicker", symbol.to_lowercase()),
            Self::UserData { listen_key } => f.write_str(listen_key),
        }
    }
}

/// Frame received from the stream server.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Incoming {
    /// Event carrying an `e` type tag.
    Event(Event),
    /// Book ticker update (untagged on the wire).
    BookTicker(BookTickerEvent),
    /// All market tickers.
    Tickers(Vec<TickerEvent>),
    /// Reply to a `SUBSCRIBE` / `UNSUBSCRIBE` command.
    Response(CommandResponse),
}

/// Reply to a command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandResponse {
    pub id: u64,
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub error: Option<CommandError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandError {
    pub code: i64,
    pub msg: String,
}

/// Stream event, tagged by `e`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "e")]
pub enum Event {
    #[serde(rename = "aggTrade")]
    AggTrade(AggTradeEvent),
    #[serde(rename = "trade")]
    Trade(TradeEvent),
    #[serde(rename = "kline")]
    Candlestick(CandlestickEvent),
    #[serde(rename = "depthUpdate")]
    Depth(DepthEvent),
    #[serde(rename = "24hrTicker")]
    Ticker(TickerEvent),
    #[serde(rename = "outboundAccountPosition")]
    AccountUpdate(AccountUpdateEvent),
    #[serde(rename = "balanceUpdate")]
    BalanceUpdate(BalanceUpdateEvent),
    #[serde(rename = "executionReport")]
    OrderTradeUpdate(OrderTradeUpdateEvent),
    #[serde(rename = "listenKeyExpired")]
    ListenKeyExpired(ListenKeyExpiredEvent),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggTradeEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "a")]
    pub agg_trade_id: u64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub qty: Decimal,
    #[serde(rename = "f")]
    pub first_trade_id: u64,
    #[serde(rename = "l")]
    pub last_trade_id: u64,
    #[serde(rename = "T")]
    pub trade_time: u64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub trade_id: u64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub qty: Decimal,
    #[serde(rename = "T")]
    pub trade_time: u64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandlestickEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "k")]
    pub bar: CandlestickBar,
}

/// Bar carried by a kline event. `is_final` is set once the bar closes.
#[derive(Debug, Clone, Deserialize)]
pub struct CandlestickBar {
    #[serde(rename = "t")]
    pub open_time: u64,
    #[serde(rename = "T")]
    pub close_time: u64,
    #[serde(rename = "i")]
    pub interval: CandlestickInterval,
    #[serde(rename = "f")]
    pub first_trade_id: i64,
    #[serde(rename = "L")]
    pub last_trade_id: i64,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "n")]
    pub number_of_trades: u64,
    #[serde(rename = "x")]
    pub is_final: bool,
    #[serde(rename = "q")]
    pub quote_asset_volume: Decimal,
    #[serde(rename = "V")]
    pub taker_buy_base_asset_volume: Decimal,
    #[serde(rename = "Q")]
    pub taker_buy_quote_asset_volume: Decimal,
}

/// Order book diff.
#[derive(Debug, Clone, Deserialize)]
pub struct DepthEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "U")]
    pub first_update_id: u64,
    #[serde(rename = "u")]
    pub final_update_id: u64,
    #[serde(rename = "b")]
    pub bids: Vec<OrderBookEntry>,
    #[serde(rename = "a")]
    pub asks: Vec<OrderBookEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "p")]
    pub price_change: Decimal,
    #[serde(rename = "P")]
    pub price_change_percent: Decimal,
    #[serde(rename = "w")]
    pub weighted_avg_price: Decimal,
    #[serde(rename = "c")]
    pub last_price: Decimal,
    #[serde(rename = "Q")]
    pub last_qty: Decimal,
    #[serde(rename = "b")]
    pub bid_price: Decimal,
    #[serde(rename = "B")]
    pub bid_qty: Decimal,
    #[serde(rename = "a")]
    pub ask_price: Decimal,
    #[serde(rename = "A")]
    pub ask_qty: Decimal,
    #[serde(rename = "o")]
    pub open_price: Decimal,
    #[serde(rename = "h")]
    pub high_price: Decimal,
    #[serde(rename = "l")]
    pub low_price: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "q")]
    pub quote_volume: Decimal,
    #[serde(rename = "O")]
    pub open_time: u64,
    #[serde(rename = "C")]
    pub close_time: u64,
    #[serde(rename = "n")]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookTickerEvent {
    #[serde(rename = "u")]
    pub update_id: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "b")]
    pub bid_price: Decimal,
    #[serde(rename = "B")]
    pub bid_qty: Decimal,
    #[serde(rename = "a")]
    pub ask_price: Decimal,
    #[serde(rename = "A")]
    pub ask_qty: Decimal,
}

/// Balances changed after an account update.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountUpdateEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "u")]
    pub last_update_time: u64,
    #[serde(rename = "B")]
    pub balances: Vec<EventBalance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventBalance {
    #[serde(rename = "a")]
    pub asset: String,
    #[serde(rename = "f")]
    pub free: Decimal,
    #[serde(rename = "l")]
    pub locked: Decimal,
}

/// Deposit, withdrawal or transfer.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceUpdateEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "a")]
    pub asset: String,
    #[serde(rename = "d")]
    pub delta: Decimal,
    #[serde(rename = "T")]
    pub clear_time: u64,
}

/// Order placed, updated, filled or cancelled.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTradeUpdateEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c")]
    pub client_order_id: String,
    #[serde(rename = "S")]
    pub side: OrderSide,
    #[serde(rename = "o")]
    pub order_type: OrderType,
    #[serde(rename = "f")]
    pub time_in_force: TimeInForce,
    #[serde(rename = "q")]
    pub quantity: Decimal,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "x")]
    pub execution_type: ExecutionType,
    #[serde(rename = "X")]
    pub status: OrderStatus,
    #[serde(rename = "r")]
    pub reject_reason: String,
    #[serde(rename = "i")]
    pub order_id: u64,
    #[serde(rename = "l")]
    pub last_executed_qty: Decimal,
    #[serde(rename = "z")]
    pub cumulative_filled_qty: Decimal,
    #[serde(rename = "L")]
    pub last_executed_price: Decimal,
    #[serde(rename = "n")]
    pub commission: Decimal,
    #[serde(rename = "N")]
    pub commission_asset: Option<String>,
    #[serde(rename = "T")]
    pub transaction_time: u64,
    #[serde(rename = "t")]
    pub trade_id: i64,
    #[serde(rename = "m", default)]
    pub is_maker: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListenKeyExpiredEvent {
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "listenKey")]
    pub listen_key: String,
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_candlestick_interval_mapping() {
        let table = [
            (CandlestickInterval::OneSecond, "1s"),
            (CandlestickInterval::OneMinute, "1m"),
            (CandlestickInterval::ThreeMinutes, "3m"),
            (CandlestickInterval::FiveMinutes, "5m"),
            (CandlestickInterval::FifteenMinutes, "15m"),
            (CandlestickInterval::HalfHourly, "30m"),
            (CandlestickInterval::Hourly, "1h"),
            (CandlestickInterval::TwoHourly, "2h"),
            (CandlestickInterval::FourHourly, "4h"),
            (CandlestickInterval::SixHourly, "6h"),
            (CandlestickInterval::EightHourly, "8h"),
            (CandlestickInterval::TwelveHourly, "12h"),
            (CandlestickInterval::Daily, "1d"),
            (CandlestickInterval::ThreeDaily, "3d"),
            (CandlestickInterval::Weekly, "1w"),
            (CandlestickInterval::Monthly, "1M"),
        ];
        for (interval, wire) in table {
            assert_eq!(interval.to_string(), wire);
            assert_eq!(wire.parse::<CandlestickInterval>().unwrap(), interval);
            assert_eq!(serde_json::to_string(&interval).unwrap(), format!("\"{wire}\""));
        }
    }

    #[test]
    fn test_candlestick_interval_rejects_unknown() {
        for wire in ["", "2m", "1H", "1y"] {
            let err = wire.parse::<CandlestickInterval>().unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "interval"));
        }
    }

    #[test]
    fn test_order_enums_mapping() {
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(OrderType::StopLossLimit.to_string(), "STOP_LOSS_LIMIT");
        assert_eq!(OrderType::LimitMaker.to_string(), "LIMIT_MAKER");
        assert_eq!(TimeInForce::Gtc.to_string(), "GTC");
        assert_eq!(OrderStatus::PartiallyFilled.to_string(), "PARTIALLY_FILLED");
        assert_eq!(NewOrderResponseType::Full.to_string(), "FULL");
        assert_eq!(ExecutionType::TradePrevention.to_string(), "TRADE_PREVENTION");
        assert_eq!(RateLimitType::RequestWeight.to_string(), "REQUEST_WEIGHT");
        assert_eq!(SymbolStatus::PreTrading.to_string(), "PRE_TRADING");

        assert_eq!("SELL".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!(
            "TAKE_PROFIT_LIMIT".parse::<OrderType>().unwrap(),
            OrderType::TakeProfitLimit
        );
        assert_eq!(
            "EXPIRED_IN_MATCH".parse::<OrderStatus>().unwrap(),
            OrderStatus::ExpiredInMatch
        );
        assert_eq!("ORDERS".parse::<RateLimitType>().unwrap(), RateLimitType::Orders);
        assert!("buy".parse::<OrderSide>().is_err());
        assert!("STOP".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_display_matches_serde() {
        for status in [
            OrderStatus::New,
            OrderStatus::PartiallyFilled,
            OrderStatus::Filled,
            OrderStatus::Canceled,
            OrderStatus::PendingCancel,
            OrderStatus::Rejected,
            OrderStatus::Expired,
            OrderStatus::ExpiredInMatch,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn test_order_status_finished() {
        assert!(!OrderStatus::New.is_finished());
        assert!(!OrderStatus::PartiallyFilled.is_finished());
        assert!(OrderStatus::Filled.is_finished());
        assert!(OrderStatus::Canceled.is_finished());
    }

    #[test]
    fn test_order_book() {
        let text = r#"{
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000"]],
            "asks": [["4.00000200", "12.00000000"]]
        }"#;
        let book: OrderBook = serde_json::from_str(text).unwrap();
        assert_eq!(book.last_update_id, 1027024);
        assert_eq!(
            book.best_bid(),
            Some(&OrderBookEntry {
                price: dec!(4),
                qty: dec!(431)
            })
        );
        assert_eq!(book.spread(), Some(dec!(0.000002)));
    }

    #[test]
    fn test_candlestick() {
        let text = r#"[[
            1499040000000, "0.01634790", "0.80000000", "0.01575800", "0.01577100",
            "148976.11427815", 1499644799999, "2434.19055334", 308,
            "1756.87402397", "28.46694368", "17928899.62484339"
        ]]"#;
        let bars: Vec<Candlestick> = serde_json::from_str(text).unwrap();
        assert_eq!(bars.len(), 1);
        let bar = &bars[0];
        assert_eq!(bar.open_time, 1499040000000);
        assert_eq!(bar.open, dec!(0.01634790));
        assert_eq!(bar.high, dec!(0.8));
        assert_eq!(bar.close_time, 1499644799999);
        assert_eq!(bar.number_of_trades, 308);
        assert_eq!(bar.taker_buy_quote_asset_volume, dec!(28.46694368));
    }

    #[test]
    fn test_agg_trade() {
        let text = r#"[{"a":26129,"p":"0.01633102","q":"4.70443515","f":27781,"l":27781,"T":1498793709153,"m":true,"M":true}]"#;
        let trades: Vec<AggTrade> = serde_json::from_str(text).unwrap();
        assert_eq!(trades[0].agg_trade_id, 26129);
        assert_eq!(trades[0].qty, dec!(4.70443515));
        assert!(trades[0].is_buyer_maker);
    }

    #[test]
    fn test_account_ignores_unknown_fields() {
        let text = r#"{
            "makerCommission": 15, "takerCommission": 15, "buyerCommission": 0,
            "sellerCommission": 0, "canTrade": true, "canWithdraw": true,
            "canDeposit": true, "brokered": false, "updateTime": 123456789,
            "accountType": "SPOT",
            "commissionRates": {"maker": "0.00150000"},
            "balances": [
                {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
                {"asset": "LTC", "free": "4763368.68006011", "locked": "1.5"},
                {"asset": "ETH", "free": "0", "locked": "0"}
            ],
            "permissions": ["SPOT"], "uid": 354937868
        }"#;
        let account: Account = serde_json::from_str(text).unwrap();
        assert_eq!(account.maker_commission, 15);
        assert_eq!(account.balance("LTC").total(), dec!(4763370.18006011));
        assert_eq!(account.balance("XRP").total(), Decimal::ZERO);
        assert_eq!(account.non_zero_balances().count(), 2);
    }

    #[test]
    fn test_order() {
        let text = r#"{
            "symbol": "LTCBTC", "orderId": 1, "orderListId": -1,
            "clientOrderId": "myOrder1", "price": "0.1", "origQty": "1.0",
            "executedQty": "0.0", "cummulativeQuoteQty": "0.0", "status": "NEW",
            "timeInForce": "GTC", "type": "LIMIT", "side": "BUY",
            "stopPrice": "0.0", "icebergQty": "0.0", "time": 1499827319559,
            "updateTime": 1499827319559, "isWorking": true,
            "origQuoteOrderQty": "0.000000", "selfTradePreventionMode": "NONE"
        }"#;
        let order: Order = serde_json::from_str(text).unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert!(order.status.is_new());
        assert_eq!(order.price, dec!(0.1));
    }

    #[test]
    fn test_new_order_ack_response() {
        let text = r#"{"symbol":"BTCUSDT","orderId":28,"orderListId":-1,"clientOrderId":"6gCrw2kRUAF9CvJDGP16IP","transactTime":1507725176595}"#;
        let resp: NewOrderResponse = serde_json::from_str(text).unwrap();
        assert_eq!(resp.order_id, 28);
        assert!(resp.status.is_none());
        assert!(resp.fills.is_empty());
    }

    #[test]
    fn test_exchange_info() {
        let text = r#"{
            "timezone": "UTC", "serverTime": 1565246363776,
            "rateLimits": [
                {"rateLimitType": "REQUEST_WEIGHT", "interval": "MINUTE", "intervalNum": 1, "limit": 6000},
                {"rateLimitType": "ORDERS", "interval": "SECOND", "intervalNum": 10, "limit": 100}
            ],
            "exchangeFilters": [],
            "symbols": [{
                "symbol": "ETHBTC", "status": "TRADING", "baseAsset": "ETH",
                "baseAssetPrecision": 8, "quoteAsset": "BTC", "quotePrecision": 8,
                "orderTypes": ["LIMIT", "LIMIT_MAKER", "MARKET"],
                "icebergAllowed": true, "isSpotTradingAllowed": true,
                "filters": [{"filterType": "PRICE_FILTER", "minPrice": "0.00000100"}]
            }]
        }"#;
        let info: ExchangeInfo = serde_json::from_str(text).unwrap();
        assert_eq!(info.rate_limits[0].rate_limit_type, RateLimitType::RequestWeight);
        assert_eq!(info.rate_limits[1].interval_num, 10);
        let ethbtc = info.symbol("ETHBTC").unwrap();
        assert!(ethbtc.status.is_trading());
        assert_eq!(ethbtc.quote_asset_precision, 8);
        assert!(ethbtc.order_types.contains(&OrderType::LimitMaker));
    }

    #[test]
    fn test_new_order_params_order() {
        let order = NewOrder::limit_buy("LTCBTC", TimeInForce::Gtc, dec!(1), dec!(0.1))
            .with_recv_window(5_000);
        let params = order.params().unwrap();
        assert_eq!(
            params.to_query(),
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1"
        );

        let order = NewOrder::market_sell("ETHBTC", dec!(2.5))
            .with_new_client_order_id("abc")
            .with_response_type(NewOrderResponseType::Full)
            .with_timestamp(1_499_827_319_559);
        assert_eq!(
            order.params().unwrap().to_query(),
            "symbol=ETHBTC&side=SELL&type=MARKET&quantity=2.5&newClientOrderId=abc&newOrderRespType=FULL&timestamp=1499827319559"
        );
    }

    #[test]
    fn test_new_order_validation() {
        let mut order = NewOrder::limit_buy("LTCBTC", TimeInForce::Gtc, dec!(1), dec!(0.1));
        order.price = None;
        let err = order.params().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "price"));

        let order = NewOrder::with_type("BTCUSDT", OrderSide::Sell, OrderType::StopLoss)
            .with_quantity(dec!(1));
        let err = order.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "stopPrice"));

        let order = NewOrder::market_buy("BTCUSDT", dec!(1)).with_quote_order_qty(dec!(100));
        assert!(order.validate().is_ok());
        assert!(order.quantity.is_none());

        let err = NewOrder::market_buy("", dec!(1)).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "symbol"));
    }

    #[test]
    fn test_order_ref_params() {
        let req = OrderStatusRequest::new("LTCBTC", Either::Left(42));
        assert_eq!(req.params().unwrap().to_query(), "symbol=LTCBTC&orderId=42");

        let mut req = CancelOrderRequest::new("LTCBTC", Either::Right("myOrder1".into()));
        req.new_client_order_id = Some("cancelMyOrder1".into());
        assert_eq!(
            req.params().unwrap().to_query(),
            "symbol=LTCBTC&origClientOrderId=myOrder1&newClientOrderId=cancelMyOrder1"
        );
    }

    #[test]
    fn test_list_request_validation() {
        assert!(AllOrdersRequest::new("LTCBTC").with_limit(1000).params().is_ok());
        assert!(AllOrdersRequest::new("LTCBTC").with_limit(1001).params().is_err());
        assert!(MyTradesRequest::new("LTCBTC").with_limit(0).params().is_err());

        let mut req = MyTradesRequest::new("LTCBTC");
        req.start_time = Some(10);
        req.end_time = Some(5);
        assert!(req.params().is_err());

        assert_eq!(OpenOrdersRequest::all().params().unwrap().to_query(), "");
        assert_eq!(
            OpenOrdersRequest::new("ETHBTC").params().unwrap().to_query(),
            "symbol=ETHBTC"
        );
    }

    #[test]
    fn test_subscription_names() {
        let sub = Subscription::Candlestick {
            symbol: "BTCUSDT".into(),
            interval: CandlestickInterval::FifteenMinutes,
        };
        assert_eq!(sub.to_string(), "btcusdt@kline_15m");
        assert_eq!(
            Subscription::AggTrade { symbol: "ETHBTC".into() }.to_string(),
            "ethbtc@aggTrade"
        );
        assert_eq!(Subscription::AllTickers.to_string(), "!ticker@arr");

        let cmd = Outgoing {
            method: Method::Subscribe,
            params: vec![sub.to_string()],
            id: 1,
        };
        assert_eq!(
            serde_json::to_string(&cmd).unwrap(),
            r#"{"method":"SUBSCRIBE","params":["btcusdt@kline_15m"],"id":1}"#
        );
    }

    #[test]
    fn test_incoming_events() {
        let text = r#"{"e":"aggTrade","E":123456789,"s":"BNBBTC","a":12345,"p":"0.001","q":"100","f":100,"l":105,"T":123456785,"m":true,"M":true}"#;
        let msg: Incoming = serde_json::from_str(text).unwrap();
        assert!(matches!(msg, Incoming::Event(Event::AggTrade(ref ev)) if ev.symbol == "BNBBTC"));

        let text = r#"{"e":"kline","E":123456789,"s":"BNBBTC","k":{"t":123400000,"T":123460000,"s":"BNBBTC","i":"1m","f":100,"L":200,"o":"0.0010","c":"0.0020","h":"0.0025","l":"0.0015","v":"1000","n":100,"x":false,"q":"1.0000","V":"500","Q":"0.500","B":"123456"}}"#;
        let msg: Incoming = serde_json::from_str(text).unwrap();
        let Incoming::Event(Event::Candlestick(ev)) = msg else {
            panic!("expected candlestick");
        };
        assert_eq!(ev.bar.interval, CandlestickInterval::OneMinute);
        assert_eq!(ev.bar.high, dec!(0.0025));
        assert!(!ev.bar.is_final);

        let text = r#"{"u":400900217,"s":"BNBUSDT","b":"25.35190000","B":"31.21000000","a":"25.36520000","A":"40.66000000"}"#;
        let msg: Incoming = serde_json::from_str(text).unwrap();
        assert!(matches!(msg, Incoming::BookTicker(ref ev) if ev.update_id == 400900217));

        let text = r#"{"result":null,"id":1}"#;
        let msg: Incoming = serde_json::from_str(text).unwrap();
        assert!(matches!(msg, Incoming::Response(ref resp) if resp.id == 1 && resp.error.is_none()));
    }

    #[test]
    fn test_user_data_events() {
        let text = r#"{"e":"outboundAccountPosition","E":1564034571105,"u":1564034571073,"B":[{"a":"ETH","f":"10000.000000","l":"0.000000"}]}"#;
        let msg: Incoming = serde_json::from_str(text).unwrap();
        assert!(matches!(msg, Incoming::Event(Event::AccountUpdate(ref ev)) if ev.balances[0].free == dec!(10000)));

        let text = r#"{"e":"executionReport","E":1499405658658,"s":"ETHBTC","c":"mUvoqJxFIILMdfAW5iGSOW","S":"BUY","o":"LIMIT","f":"GTC","q":"1.00000000","p":"0.10264410","P":"0.00000000","F":"0.00000000","g":-1,"C":"","x":"NEW","X":"NEW","r":"NONE","i":4293153,"l":"0.00000000","z":"0.00000000","L":"0.00000000","n":"0","N":null,"T":1499405658657,"t":-1,"I":8641984,"w":true,"m":false,"M":false,"O":1499405658657,"Z":"0.00000000","Y":"0.00000000","Q":"0.00000000"}"#;
        let msg: Incoming = serde_json::from_str(text).unwrap();
        let Incoming::Event(Event::OrderTradeUpdate(ev)) = msg else {
            panic!("expected execution report");
        };
        assert_eq!(ev.execution_type, ExecutionType::New);
        assert_eq!(ev.order_id, 4293153);
        assert!(ev.commission_asset.is_none());
    }
}
