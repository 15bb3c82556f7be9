//! Values every non-zero spot balance in BTC, then in USDT.
//!
//! Assets are priced against BTC. Fiat and stablecoins are quoted the other
//! way round (`BTCUSDT`), so their amount is divided by the price instead.

use std::collections::HashMap;

use binance_sdk::{
    Decimal,
    spot::{Config, HttpClient},
};
use clap::Parser;

use crate::credentials::Credentials;

mod credentials;

const BTC: &str = "BTC";

/// Assets quoted as `BTC<asset>` rather than `<asset>BTC`.
const FIAT: &[&str] = &[
    "USDT", "USDC", "TUSD", "FDUSD", "EUR", "TRY", "BRL", "ARS", "PLN", "RON", "ZAR", "JPY", "MXN",
    "UAH",
];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,
}

fn value_in_btc(asset: &str, amount: Decimal, prices: &HashMap<String, Decimal>) -> Option<Decimal> {
    if asset == BTC {
        return Some(amount);
    }

    if FIAT.contains(&asset) {
        let price = prices.get(&format!("{BTC}{asset}"))?;
        (!price.is_zero()).then(|| amount / price)
    } else {
        let price = prices.get(&format!("{asset}{BTC}"))?;
        Some(amount * price)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = simple_logger::init_with_level(log::Level::Info);

    let args = Cli::parse();
    let client = HttpClient::new(Config {
        credentials: Some(args.credentials.get()?),
        ..Default::default()
    })?;

    let timestamp = chrono::Utc::now().timestamp_millis() as u64;
    let account = client.account_with(Some(60_000), Some(timestamp)).await?;
    let prices: HashMap<_, _> = client
        .all_prices()
        .await?
        .into_iter()
        .map(|ticker| (ticker.symbol, ticker.price))
        .collect();

    let mut total_btc = Decimal::ZERO;
    for balance in account.non_zero_balances() {
        match value_in_btc(&balance.asset, balance.total(), &prices) {
            Some(value) => total_btc += value,
            None => log::warn!("no BTC market for {}, skipped", balance.asset),
        }
    }

    let btc_usdt = prices
        .get("BTCUSDT")
        .copied()
        .ok_or_else(|| anyhow::anyhow!("BTCUSDT price unavailable"))?;

    println!("{}", total_btc.normalize());
    println!("{}", (total_btc * btc_usdt).round_dp(2));

    Ok(())
}
