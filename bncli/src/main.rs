use std::io::{Write, stdout};

use binance_sdk::spot::{
    Config, Credentials, Domain, HttpClient,
    types::{CandlestickInterval, OpenOrdersRequest},
};
use clap::{Args, Parser, Subcommand};
use enum_dispatch::enum_dispatch;

#[derive(Parser)]
#[command(author, version)]
struct Cli {
    #[command(flatten)]
    conn: ConnArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Connection and credential options shared by every command.
#[derive(Args)]
struct ConnArgs {
    /// Exchange domain: `com` or `us`.
    #[arg(long, global = true, default_value = "com")]
    domain: Domain,
    /// API key. Falls back to BINANCE_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// API secret. Falls back to BINANCE_API_SECRET.
    #[arg(long, global = true)]
    api_secret: Option<String>,
    /// Default recvWindow for signed calls, in milliseconds.
    #[arg(long, global = true)]
    recv_window: Option<u64>,
}

impl ConnArgs {
    fn client(&self) -> anyhow::Result<HttpClient> {
        let credentials = match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
            (Some(key), None) => Some(Credentials::api_key_only(key)),
            _ => Credentials::from_env(),
        };
        Ok(HttpClient::new(Config {
            domain: self.domain,
            credentials,
            recv_window: self.recv_window,
            ..Default::default()
        })?)
    }
}

#[enum_dispatch]
trait Run {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()>;
}

#[derive(Subcommand)]
#[enum_dispatch(Run)]
enum Commands {
    /// Test connectivity
    Ping(PingCmd),
    /// Show server time and local clock drift
    Time(TimeCmd),
    /// Latest price for one or all symbols
    Price(PriceCmd),
    /// Order book snapshot
    Depth(DepthCmd),
    /// Kline/candlestick bars
    Klines(KlinesCmd),
    /// Non-zero account balances
    Account(AccountCmd),
    /// Open orders
    OpenOrders(OpenOrdersCmd),
    /// Start a user data stream and print its listen key
    ListenKey(ListenKeyCmd),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Warn)?;

    let args = Cli::parse();
    let client = args.conn.client()?;
    args.command.run(&client).await
}

#[derive(Args)]
struct PingCmd;

impl Run for PingCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        client.ping().await?;
        println!("pong from {}", client.base_url());
        Ok(())
    }
}

#[derive(Args)]
struct TimeCmd;

impl Run for TimeCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let server = client.server_time().await?;
        let local = chrono::Utc::now().timestamp_millis();
        println!("server time: {server}");
        println!("local drift: {}ms", local - server as i64);
        Ok(())
    }
}

#[derive(Args)]
struct PriceCmd {
    /// Symbol, e.g. BTCUSDT. All symbols when omitted.
    symbol: Option<String>,
}

impl Run for PriceCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let prices = match &self.symbol {
            Some(symbol) => vec![client.price(symbol).await?],
            None => client.all_prices().await?,
        };

        let mut writer = tabwriter::TabWriter::new(stdout());
        writeln!(&mut writer, "symbol\tprice")?;
        for ticker in prices {
            writeln!(&mut writer, "{}\t{}", ticker.symbol, ticker.price)?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[derive(Args)]
struct DepthCmd {
    symbol: String,
    /// Number of levels per side.
    #[arg(long, default_value_t = 10)]
    limit: u16,
}

impl Run for DepthCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let book = client.order_book(&self.symbol, Some(self.limit)).await?;
        let mut writer = tabwriter::TabWriter::new(stdout());

        writeln!(&mut writer, "side\tprice\tqty")?;
        for level in book.asks.iter().rev() {
            writeln!(&mut writer, "ask\t{}\t{}", level.price, level.qty)?;
        }
        for level in &book.bids {
            writeln!(&mut writer, "bid\t{}\t{}", level.price, level.qty)?;
        }
        writer.flush()?;

        if let Some(spread) = book.spread() {
            println!("spread: {spread}");
        }

        Ok(())
    }
}

#[derive(Args)]
struct KlinesCmd {
    symbol: String,
    /// Interval code: 1m, 5m, 1h, 1d, ...
    #[arg(long, default_value = "1h")]
    interval: CandlestickInterval,
    #[arg(long)]
    limit: Option<u16>,
}

impl Run for KlinesCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let bars = client
            .candlesticks(&self.symbol, self.interval, self.limit, None, None)
            .await?;
        let mut writer = tabwriter::TabWriter::new(stdout());

        writeln!(&mut writer, "open time\topen\thigh\tlow\tclose\tvolume\ttrades")?;
        for bar in bars {
            writeln!(
                &mut writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                bar.open_time,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
                bar.number_of_trades,
            )?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[derive(Args)]
struct AccountCmd;

impl Run for AccountCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let account = client.account().await?;
        let mut writer = tabwriter::TabWriter::new(stdout());

        writeln!(&mut writer, "asset\tfree\tlocked")?;
        for balance in account.non_zero_balances() {
            writeln!(
                &mut writer,
                "{}\t{}\t{}",
                balance.asset, balance.free, balance.locked
            )?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[derive(Args)]
struct OpenOrdersCmd {
    /// Restrict to one symbol.
    symbol: Option<String>,
}

impl Run for OpenOrdersCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let req = match &self.symbol {
            Some(symbol) => OpenOrdersRequest::new(symbol),
            None => OpenOrdersRequest::all(),
        };
        let orders = client.open_orders(req).await?;
        let mut writer = tabwriter::TabWriter::new(stdout());

        writeln!(
            &mut writer,
            "symbol\tid\tclient id\tside\ttype\tprice\tqty\texecuted\tstatus"
        )?;
        for order in orders {
            writeln!(
                &mut writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                order.symbol,
                order.order_id,
                order.client_order_id,
                order.side,
                order.order_type,
                order.price,
                order.orig_qty,
                order.executed_qty,
                order.status,
            )?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[derive(Args)]
struct ListenKeyCmd;

impl Run for ListenKeyCmd {
    async fn run(&self, client: &HttpClient) -> anyhow::Result<()> {
        let key = client.start_user_data_stream().await?;
        println!("{key}");
        Ok(())
    }
}
