//! Walks through the public market data endpoints for one symbol.

use binance_sdk::spot::{self, types::CandlestickInterval};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "BNBBTC")]
    symbol: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = simple_logger::init_with_level(log::Level::Debug);

    let args = Cli::parse();
    let client = spot::com()?;

    client.ping().await?;
    println!("server time: {}", client.server_time().await?);

    let info = client.exchange_info().await?;
    if let Some(symbol) = info.symbol(&args.symbol) {
        println!(
            "{}: {}/{} status={}",
            symbol.symbol, symbol.base_asset, symbol.quote_asset, symbol.status
        );
    }

    let book = client.order_book(&args.symbol, Some(10)).await?;
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        println!("best bid {} x {}, best ask {} x {}", bid.price, bid.qty, ask.price, ask.qty);
    }

    let ticker = client.ticker_24h(&args.symbol).await?;
    println!(
        "24h: last={} change={}% volume={}",
        ticker.last_price, ticker.price_change_percent, ticker.volume
    );

    let bars = client
        .candlesticks(&args.symbol, CandlestickInterval::Hourly, Some(5), None, None)
        .await?;
    for bar in bars {
        println!(
            "{} o={} h={} l={} c={}",
            bar.open_time, bar.open, bar.high, bar.low, bar.close
        );
    }

    let trades = client.agg_trades(&args.symbol, None, Some(5), None, None).await?;
    for trade in trades {
        println!("agg trade {}: {} @ {}", trade.agg_trade_id, trade.qty, trade.price);
    }

    Ok(())
}
