//! Opens a user data stream and prints account and order events.
//!
//! The listen key is kept alive every 30 minutes and closed on Ctrl-C.

use std::time::Duration;

use binance_sdk::spot::{
    Config, HttpClient,
    types::{Event, Incoming, Subscription},
};
use clap::Parser;
use futures::StreamExt;

use crate::credentials::Credentials;

mod credentials;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = simple_logger::init_with_level(log::Level::Debug);

    let args = Cli::parse();
    let client = HttpClient::new(Config {
        credentials: Some(args.credentials.get()?),
        ..Default::default()
    })?;

    let listen_key = client.start_user_data_stream().await?.listen_key;

    let keep_alive = tokio::spawn({
        let client = client.clone();
        let listen_key = listen_key.clone();
        async move {
            let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = client.keep_alive_user_data_stream(&listen_key).await {
                    log::error!("keep-alive failed: {err}");
                }
            }
        }
    });

    let mut ws = client.websocket();
    ws.subscribe(Subscription::UserData {
        listen_key: listen_key.clone(),
    });

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            item = ws.next() => {
                let Some(item) = item else { break };
                match item {
                    Incoming::Event(Event::AccountUpdate(update)) => {
                        for balance in update.balances {
                            println!("{}: free={} locked={}", balance.asset, balance.free, balance.locked);
                        }
                    }
                    Incoming::Event(Event::BalanceUpdate(update)) => {
                        println!("{} delta {}", update.asset, update.delta);
                    }
                    Incoming::Event(Event::OrderTradeUpdate(report)) => {
                        println!(
                            "{} order {} {} {}: {} filled {}",
                            report.symbol,
                            report.order_id,
                            report.side,
                            report.execution_type,
                            report.status,
                            report.cumulative_filled_qty
                        );
                    }
                    Incoming::Event(Event::ListenKeyExpired(_)) => {
                        log::warn!("listen key expired");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    keep_alive.abort();
    ws.close();
    client.close_user_data_stream(&listen_key).await?;

    Ok(())
}
