//! Authenticated account walkthrough: balances, deposits and open orders.
//!
//! Requires BACKPACK_API_KEY and BACKPACK_SECRET_KEY in the environment
//! (or a .env file with the env-file feature enabled).
//!
//! Run with: cargo run --example account_orders

use backpack_client::{build_account_client, BackpackConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = BackpackConfig::from_env()?;
    let account = build_account_client(&config)?;

    let balances = account.get_balances(None).await?;
    println!("Balances: {balances}");

    let deposits = account.get_deposits(100, 0, None, None, None).await?;
    println!("Deposits: {deposits}");

    let open_orders = account.get_open_orders("SOL_USDC", None).await?;
    println!("Open orders for SOL_USDC: {open_orders}");

    let order_history = account.get_order_history("SOL_USDC", 100, 0, None).await?;
    println!("Order history for SOL_USDC: {order_history}");

    Ok(())
}
