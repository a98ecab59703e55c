// Incoming payment breakdown for the tracked account
// Walks its full transaction history and splits inbound PFT into
// reward-wallet payments and everything else

use anyhow::{Context, Result};
use pft_analytics::classifier::{PaymentClassifier, TOP_OTHER_SENDERS};
use pft_analytics::config::Config;
use pft_analytics::feed::{PaginatedFeedReader, RpcLedgerClient};
use pft_analytics::format::format_number;
use pft_analytics::logging::init_logging;
use tracing::info;

/// Fraction digits in the printed breakdown
const DECIMALS: usize = 3;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::load_or_default()?;
    init_logging(&config.monitoring);

    let tracked = config.tracking.tracked_address.as_str();
    info!("🔌 Ledger RPC: {}", config.rpc.endpoint);
    info!("🎯 Tracked account: {}", tracked);
    info!("👥 {} reward wallets", config.tracking.reward_addresses.len());

    let client = RpcLedgerClient::new(&config.rpc).context("Failed to create ledger client")?;

    let balance = client
        .account_balance(tracked)
        .await
        .context("Failed to fetch account balance")?;
    println!("Balance: {} PFT\n", format_number(balance, DECIMALS));

    let transactions = PaginatedFeedReader::new(&client, config.rpc.page_size)
        .scan_all(tracked)
        .await
        .context("Failed to scan transaction history")?;

    let classifier = PaymentClassifier::new(tracked, config.tracking.reward_addresses.iter().cloned());
    let result = classifier.classify(&transactions);

    println!("=== INCOMING BREAKDOWN ===");
    println!("From reward wallets: {} PFT", format_number(result.known_total(), DECIMALS));
    println!("From other sources: {} PFT", format_number(result.other_total(), DECIMALS));
    println!("Total incoming: {} PFT", format_number(result.total(), DECIMALS));

    if !result.other_senders().is_empty() {
        println!("\nTop non-reward senders:");
        let ranking = result.other_sender_ranking();
        for entry in ranking.top_n(TOP_OTHER_SENDERS) {
            println!("  {}: {} PFT", entry.identity, format_number(entry.metric, DECIMALS));
        }
    }

    Ok(())
}
