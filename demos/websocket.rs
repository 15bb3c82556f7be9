//! Streams trades, closed one-minute bars and the best bid/ask for a symbol.

use binance_sdk::spot::{
    self,
    types::{CandlestickInterval, Event, Incoming, Subscription},
};
use clap::Parser;
use futures::StreamExt;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "BTCUSDT")]
    symbol: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = simple_logger::init_with_level(log::Level::Debug);

    let args = Cli::parse();
    let mut ws = spot::com()?.websocket();

    ws.subscribe(Subscription::Trade {
        symbol: args.symbol.clone(),
    });
    ws.subscribe(Subscription::Candlestick {
        symbol: args.symbol.clone(),
        interval: CandlestickInterval::OneMinute,
    });
    ws.subscribe(Subscription::BookTicker {
        symbol: args.symbol.clone(),
    });

    while let Some(item) = ws.next().await {
        match item {
            Incoming::Event(Event::Trade(trade)) => {
                println!("trade {} {} @ {}", trade.symbol, trade.qty, trade.price);
            }
            Incoming::Event(Event::Candlestick(kline)) if kline.bar.is_final => {
                println!(
                    "bar {} o={} h={} l={} c={}",
                    kline.bar.open_time, kline.bar.open, kline.bar.high, kline.bar.low, kline.bar.close
                );
            }
            Incoming::BookTicker(book) => {
                println!("book {} / {}", book.bid_price, book.ask_price);
            }
            _ => {}
        }
    }

    Ok(())
}
