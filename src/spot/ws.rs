//! WebSocket client for real-time Spot market and user data.
//!
//! This module provides a persistent WebSocket connection that automatically
//! reconnects on failure and replays subscriptions across reconnections.
//! Frames are decoded on a background task and delivered one at a time, in
//! arrival order.
//!
//! # Examples
//!
//! ## Subscribe to Market Data
//!
//! ```no_run
//! use binance_sdk::spot::{self, types::*};
//! use futures::StreamExt;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut ws = spot::com()?.websocket();
//!
//! ws.subscribe(Subscription::Trade { symbol: "BTCUSDT".into() });
//! ws.subscribe(Subscription::Candlestick {
//!     symbol: "BTCUSDT".into(),
//!     interval: CandlestickInterval::OneMinute,
//! });
//!
//! while let Some(msg) = ws.next().await {
//!     match msg {
//!         Incoming::Event(Event::Trade(trade)) => {
//!             println!("Trade: {} @ {}", trade.qty, trade.price);
//!         }
//!         Incoming::Event(Event::Candlestick(kline)) if kline.bar.is_final => {
//!             println!("Closed bar: {}", kline.bar.close);
//!         }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Subscribe to User Data
//!
//! ```no_run
//! use binance_sdk::spot::{self, Config, types::*};
//! use futures::StreamExt;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = spot::HttpClient::new(Config::from_env())?;
//! let listen_key = client.start_user_data_stream().await?;
//!
//! let mut ws = client.websocket();
//! ws.subscribe(Subscription::UserData { listen_key: listen_key.listen_key });
//!
//! while let Some(msg) = ws.next().await {
//!     if let Incoming::Event(Event::OrderTradeUpdate(report)) = msg {
//!         println!("{} {}: {}", report.symbol, report.order_id, report.status);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashSet,
    pin::Pin,
    task::{Context, Poll, ready},
    time::Duration,
};

use anyhow::Result;
use futures::StreamExt;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    time::{sleep, timeout},
};
use url::Url;
use yawc::{Options, WebSocket};

use super::{
    Error,
    types::{Incoming, Method, Outgoing, Subscription},
};

struct Stream {
    stream: WebSocket,
    next_id: u64,
}

impl Stream {
    /// Establish a WebSocket connection.
    async fn connect(url: Url) -> Result<Self> {
        let stream = yawc::WebSocket::connect(url)
            .with_options(Options::default().with_no_delay())
            .await?;

        Ok(Self { stream, next_id: 1 })
    }

    /// Sends a command for a single stream name.
    async fn send(&mut self, method: Method, subscription: &Subscription) -> Result<()> {
        let id = self.next_id;
        self.next_id += 1;
        self.stream
            .send_json(&Outgoing {
                method,
                params: vec![subscription.to_string()],
                id,
            })
            .await?;
        Ok(())
    }

    async fn subscribe(&mut self, subscription: &Subscription) -> Result<()> {
        self.send(Method::Subscribe, subscription).await
    }

    async fn unsubscribe(&mut self, subscription: &Subscription) -> Result<()> {
        self.send(Method::Unsubscribe, subscription).await
    }
}

impl futures::Stream for Stream {
    type Item = Incoming;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        while let Some(item) = ready!(this.stream.poll_next_unpin(cx)) {
            match serde_json::from_slice::<Incoming>(&item.payload) {
                Ok(Incoming::Response(resp)) => match resp.error {
                    Some(err) => {
                        log::warn!("command {} failed: {} {}", resp.id, err.code, err.msg)
                    }
                    None => log::debug!("command {} acknowledged", resp.id),
                },
                Ok(ok) => {
                    return Poll::Ready(Some(ok));
                }
                Err(err) => {
                    if let Ok(s) = std::str::from_utf8(&item.payload) {
                        log::warn!("unable to parse: {}: {:?}", s, err);
                    }
                }
            }
        }

        Poll::Ready(None)
    }
}

type SubChannelData = (bool, Subscription);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RECONNECT_DELAY: Duration = Duration::from_millis(1_500);

/// Persistent WebSocket connection with automatic reconnection.
///
/// This connection automatically handles:
/// - Reconnection on connection failure (the server also drops every
///   connection after 24 hours)
/// - Re-subscription after reconnection
///
/// Server pings are answered by the transport. The connection implements
/// `futures::Stream`, yielding [`Incoming`] messages; command acknowledgements
/// are consumed internally.
///
/// # Example
///
/// ```no_run
/// use binance_sdk::spot::{Domain, WebSocket, types::*};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let mut ws = WebSocket::new(Domain::Com.stream_url());
/// ws.subscribe(Subscription::BookTicker { symbol: "BNBUSDT".into() });
///
/// while let Some(msg) = ws.next().await {
///     // Handle messages
/// }
/// # }
/// ```
pub struct Connection {
    rx: UnboundedReceiver<Incoming>,
    tx: UnboundedSender<SubChannelData>,
}

impl Connection {
    /// Creates a new WebSocket connection to the specified URL.
    ///
    /// The connection starts immediately and runs in the background,
    /// automatically reconnecting on failures. Must be called from within a
    /// tokio runtime.
    pub fn new(url: Url) -> Self {
        let (tx, rx) = unbounded_channel();
        let (stx, srx) = unbounded_channel();
        tokio::spawn(connection(url, tx, srx));
        Self { rx, tx: stx }
    }

    /// Like [`Connection::new`], but rejects URLs that are not `ws://` or `wss://`.
    pub fn try_new(url: Url) -> super::Result<Self> {
        match url.scheme() {
            "ws" | "wss" => Ok(Self::new(url)),
            scheme => Err(Error::WebSocket(format!(
                "unsupported scheme `{scheme}` in {url}"
            ))),
        }
    }

    /// Subscribes to a stream.
    ///
    /// The subscription persists across reconnections. Subscribing twice to
    /// the same stream is a no-op.
    pub fn subscribe(&self, subscription: Subscription) {
        let _ = self.tx.send((true, subscription));
    }

    /// Unsubscribes from a stream. Does nothing if not subscribed.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let _ = self.tx.send((false, subscription));
    }

    /// Closes the WebSocket connection.
    ///
    /// The background task exits on its next wakeup.
    pub fn close(self) {
        drop(self);
    }
}

impl futures::Stream for Connection {
    type Item = Incoming;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.rx.poll_recv(cx)
    }
}

async fn connection(
    url: Url,
    tx: UnboundedSender<Incoming>,
    mut srx: UnboundedReceiver<SubChannelData>,
) {
    let mut subs = HashSet::new();

    loop {
        if tx.is_closed() || srx.is_closed() {
            log::debug!("connection to {url} dropped");
            return;
        }

        let mut stream = match timeout(CONNECT_TIMEOUT, Stream::connect(url.clone())).await {
            Ok(Ok(ok)) => ok,
            Ok(Err(err)) => {
                log::error!("unable to connect to {url}: {err:?}");
                if !backoff(&mut subs, &mut srx).await {
                    return;
                }
                continue;
            }
            Err(err) => {
                log::error!("timed out connecting to {url}: {err:?}");
                if !backoff(&mut subs, &mut srx).await {
                    return;
                }
                continue;
            }
        };

        for sub in subs.iter() {
            log::debug!("resubscribing to {sub}");
            let _ = stream.subscribe(sub).await;
        }

        loop {
            tokio::select! {
                maybe_item = stream.next() => {
                    let Some(item) = maybe_item else { break; };
                    if tx.send(item).is_err() {
                        // receiver dropped
                        return;
                    }
                }
                item = srx.recv() => {
                    let Some((is_sub, sub)) = item else { return };
                    if is_sub {
                        if !subs.insert(sub.clone()) {
                            log::debug!("already subscribed to {sub}");
                            continue;
                        }

                        if let Err(err) = stream.subscribe(&sub).await {
                            log::error!("subscribing to {sub}: {err:?}");
                            break;
                        }
                    } else if subs.remove(&sub) {
                        if let Err(err) = stream.unsubscribe(&sub).await {
                            log::error!("unsubscribing from {sub}: {err:?}");
                            break;
                        }
                    }
                }
            }
        }

        log::debug!("disconnected from {url}");
    }
}

/// Waits out the reconnect delay, recording (un)subscriptions that arrive
/// meanwhile. Returns false once the [`Connection`] has been dropped.
async fn backoff(
    subs: &mut HashSet<Subscription>,
    srx: &mut UnboundedReceiver<SubChannelData>,
) -> bool {
    let delay = sleep(RECONNECT_DELAY);
    tokio::pin!(delay);

    loop {
        tokio::select! {
            _ = &mut delay => return true,
            item = srx.recv() => match item {
                Some((true, sub)) => {
                    subs.insert(sub);
                }
                Some((false, sub)) => {
                    subs.remove(&sub);
                }
                None => return false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_http_urls() {
        let err = Connection::try_new("https://api.binance.com".parse().unwrap())
            .err()
            .unwrap();
        assert!(matches!(err, Error::WebSocket(ref msg) if msg.contains("https")));
    }

    fn unreachable_url() -> Url {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("ws://{}/ws", listener.local_addr().unwrap())
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn test_try_new_accepts_ws_url() {
        let ws = Connection::try_new(unreachable_url()).unwrap();
        ws.close();
    }

    #[tokio::test]
    async fn test_reconnect_loop_stops_once_dropped() {
        let (tx, rx) = unbounded_channel();
        let (stx, srx) = unbounded_channel();
        let task = tokio::spawn(connection(unreachable_url(), tx, srx));

        // subscriptions made while the server is unreachable are kept
        stx.send((true, Subscription::AllTickers)).unwrap();
        sleep(Duration::from_millis(200)).await;
        assert!(!task.is_finished());

        drop((rx, stx));
        timeout(Duration::from_secs(1), task)
            .await
            .expect("reconnect loop outlived its connection")
            .unwrap();
    }

    #[tokio::test]
    async fn test_backoff_records_subscriptions() {
        let (stx, mut srx) = unbounded_channel();
        let mut subs = HashSet::new();

        stx.send((true, Subscription::AllTickers)).unwrap();
        stx.send((true, Subscription::Trade { symbol: "ETHBTC".into() })).unwrap();
        stx.send((false, Subscription::AllTickers)).unwrap();
        assert!(backoff(&mut subs, &mut srx).await);
        assert_eq!(
            subs,
            HashSet::from([Subscription::Trade { symbol: "ETHBTC".into() }])
        );

        drop(stx);
        assert!(!backoff(&mut subs, &mut srx).await);
    }
}
