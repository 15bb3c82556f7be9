//! Shows how testing, placing, querying and cancelling an order works.
//!
//! A far-from-market limit order is validated with the test endpoint, placed,
//! looked up by its exchange id and then cancelled by its client order id.

use binance_sdk::spot::{
    Config, HttpClient,
    types::{
        AllOrdersRequest, CancelOrderRequest, NewOrder, NewOrderResponseType, OrderRef,
        OrderStatusRequest, TimeInForce,
    },
};
use clap::Parser;
use rust_decimal::dec;

use crate::credentials::Credentials;

mod credentials;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,
    #[arg(long, default_value = "BNBUSDT")]
    symbol: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = simple_logger::init_with_level(log::Level::Debug);

    let args = Cli::parse();
    let client = HttpClient::new(Config {
        credentials: Some(args.credentials.get()?),
        recv_window: Some(5_000),
        ..Default::default()
    })?;

    let order = NewOrder::limit_buy(&args.symbol, TimeInForce::Gtc, dec!(0.05), dec!(100))
        .with_response_type(NewOrderResponseType::Result);

    client.new_order_test(order.clone()).await?;
    println!("test order accepted");

    let placed = client.new_order(order).await?;
    println!(
        "placed order {} ({}) status={:?}",
        placed.order_id, placed.client_order_id, placed.status
    );

    let status = client
        .order_status(OrderStatusRequest::new(
            &args.symbol,
            OrderRef::Left(placed.order_id),
        ))
        .await?;
    println!(
        "order {}: {} {} {} @ {} executed={}",
        status.order_id, status.status, status.side, status.orig_qty, status.price, status.executed_qty
    );

    let cancelled = client
        .cancel_order(CancelOrderRequest::new(
            &args.symbol,
            OrderRef::Right(placed.client_order_id),
        ))
        .await?;
    println!("cancelled order {} status={:?}", cancelled.order_id, cancelled.status);

    let recent = client
        .all_orders(AllOrdersRequest::new(&args.symbol).with_limit(5))
        .await?;
    for order in recent {
        println!("{} {} {} {}", order.order_id, order.side, order.order_type, order.status);
    }

    Ok(())
}
