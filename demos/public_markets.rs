//! Walk through the public market-data endpoints.
//!
//! Run with: cargo run --example public_markets

use backpack_client::{build_public_client, BackpackConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let public = build_public_client(&BackpackConfig::read_only())?;

    let assets = public.get_assets().await?;
    println!("Assets: {assets}");

    let markets = public.get_markets().await?;
    println!("Markets: {markets}");

    let ticker = public.get_ticker("SOL_USDC").await?;
    println!("Ticker for SOL_USDC: {ticker}");

    let depth = public.get_depth("SOL_USDC").await?;
    println!("Depth for SOL_USDC: {depth}");

    let klines = public.get_klines("SOL_USDC", "1d", None, None).await?;
    println!("K-lines for SOL_USDC: {klines}");

    let status = public.get_status().await?;
    println!("System status: {status}");

    let ping = public.get_ping().await?;
    println!("Ping: {ping}");

    let time = public.get_time().await?;
    println!("Server time: {time}");

    let trades = public.get_recent_trades("SOL_USDC", Some(10)).await?;
    println!("Recent trades: {trades}");

    Ok(())
}
