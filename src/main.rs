//! Polymarket best-bid CLI entry point.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use polymarket_best_bid::allowances;
use polymarket_best_bid::bidding::{run_best_bid, BidRequest, RunOutcome};
use polymarket_best_bid::config::Config;
use polymarket_best_bid::market::{
    fetch_market, find_low_price_markets, parse_market_tokens, PolymarketClient,
};
use polymarket_best_bid::signing::address_from_private_key;

/// Place the best bid on a Polymarket market.
#[derive(Parser, Debug)]
#[command(name = "polymarket-best-bid")]
#[command(about = "Place a bid one tick above the best bid on a Polymarket market")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// The token ID of the market outcome to bid on.
    #[arg(long)]
    token_id: Option<String>,

    /// Run in dry-run mode (only log, don't place orders).
    #[arg(long)]
    dry_run: bool,

    /// Disable dry-run mode and place real orders.
    #[arg(long, conflicts_with = "dry_run")]
    no_dry_run: bool,

    /// Maximum bid price in dollars (default: 0.05).
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Number of shares to order (default: 5).
    #[arg(long)]
    size: Option<Decimal>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check configuration validity.
    CheckConfig,

    /// Check wallet address and USDC balance.
    CheckBalance,

    /// Find low-priced market outcomes worth bidding on.
    FindMarkets {
        /// Maximum outcome price to include.
        #[arg(long, default_value = "0.05")]
        max_price: Decimal,

        /// Maximum number of markets to fetch.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one market's outcomes and token IDs.
    ShowMarket {
        /// The market's condition ID.
        condition_id: String,
    },

    /// Show the contracts a trading wallet must approve.
    CheckAllowances,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("polymarket_best_bid=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckBalance) => cmd_check_balance().await,
        Some(Command::FindMarkets { max_price, limit }) => cmd_find_markets(max_price, limit).await,
        Some(Command::ShowMarket { condition_id }) => cmd_show_market(&condition_id).await,
        Some(Command::CheckAllowances) => cmd_check_allowances(),
        None => cmd_bid(args).await,
    }
}

/// Run the single-shot bid flow.
async fn cmd_bid(args: Args) -> anyhow::Result<()> {
    let token_id = args
        .token_id
        .ok_or_else(|| anyhow::anyhow!("--token-id is required (see --help)"))?;

    // Load configuration
    info!("Loading configuration...");
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // CLI args override env vars
    let max_price = args.max_price.unwrap_or(config.max_bid_price);
    let size = args.size.unwrap_or(config.order_size);
    let dry_run = if args.no_dry_run {
        false
    } else if args.dry_run {
        true
    } else {
        config.dry_run
    };

    info!("Mode: {}", if dry_run { "DRY RUN" } else { "LIVE ORDER" });
    info!(max_price = %max_price, size = %size, "Bid settings");

    if !dry_run {
        warn!("Dry run is disabled: a real order may be placed");
    }

    let client = PolymarketClient::new(&config);

    let request = BidRequest {
        token_id,
        max_price,
        size,
        dry_run,
    };

    match run_best_bid(&client, &request).await? {
        RunOutcome::Placed {
            order_id,
            price,
            size,
        } => {
            info!(order_id = %order_id, price = %price, size = %size, "Run complete: order placed");
        }
        RunOutcome::DryRun { price, size } => {
            info!(price = %price, size = %size, "Run complete: dry run, no order submitted");
        }
        RunOutcome::Skipped(reason) => {
            info!(reason = %reason, "Run complete: no order placed");
        }
    }

    Ok(())
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("BEST BID BOT - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Checking private key... ");
    match address_from_private_key(&config.polymarket_private_key) {
        Ok(addr) => {
            println!("OK");
            println!("  Wallet address: {}", addr);
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Private key invalid"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Host: {}", config.polymarket_host);
    println!("  Chain ID: {}", config.polymarket_chain_id);
    println!("  Private Key: {}", config.masked_key());
    println!("  Funder Address: {}", config.polymarket_funder_address);
    println!(
        "  Signature Type: {} ({})",
        config.polymarket_signature_type,
        match config.polymarket_signature_type {
            0 => "EOA - Standard wallet",
            1 => "Magic.link - Proxy wallet",
            2 => "Browser wallet proxy",
            _ => "Unknown",
        }
    );
    println!("  Max Bid Price: ${}", config.max_bid_price);
    println!("  Order Size: {} shares", config.order_size);
    println!("  Dry Run: {}", config.dry_run);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check wallet address and USDC balance.
async fn cmd_check_balance() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("BEST BID BOT - BALANCE CHECK");
    println!("======================================================================");

    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("Host: {}", config.polymarket_host);
    println!("Signature Type: {}", config.polymarket_signature_type);
    println!("======================================================================");

    print!("\n1. Creating client... ");
    let client = PolymarketClient::new(&config);
    println!("OK");

    print!("\n2. Getting wallet address... ");
    let address = client.get_address()?;
    println!("OK");
    println!("   Address: {}", address);

    print!("\n3. Getting USDC balance... ");
    match client.get_balance().await {
        Ok(balance) => {
            println!("OK");
            println!("   USDC Balance: ${:.6}", balance);
        }
        Err(e) => {
            println!("FAILED");
            println!("   Error: {}", e);
        }
    }

    println!("\n======================================================================");
    println!("BALANCE CHECK COMPLETED");
    println!("======================================================================");

    Ok(())
}

/// Find low-priced outcomes to bid on.
async fn cmd_find_markets(max_price: Decimal, limit: usize) -> anyhow::Result<()> {
    let config = Config::load()?;

    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
        .build()?;

    println!("Searching for outcomes priced at or below ${}...\n", max_price);

    let results =
        find_low_price_markets(&http_client, &config.gamma_api_url, max_price, limit).await?;

    if results.is_empty() {
        println!("No outcomes found at or below ${}", max_price);
        return Ok(());
    }

    for outcome in &results {
        println!("{}", "-".repeat(70));
        println!("Question: {}", outcome.question);
        println!("  Outcome: {}", outcome.outcome);
        println!("  Price: ${}", outcome.price);
        println!("  Token ID: {}", outcome.token_id);
        println!("  Condition ID: {}", outcome.condition_id);
    }
    println!("{}", "-".repeat(70));
    println!("{} outcome(s) found", results.len());

    Ok(())
}

/// Show one market's outcomes and token IDs.
async fn cmd_show_market(condition_id: &str) -> anyhow::Result<()> {
    let config = Config::load()?;

    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
        .build()?;

    let market = fetch_market(&http_client, &config.gamma_api_url, condition_id).await?;

    println!("======================================================================");
    println!("Question: {}", market.question.as_deref().unwrap_or("N/A"));
    println!(
        "Condition ID: {}",
        market.condition_id.as_deref().unwrap_or("N/A")
    );
    println!();

    let tokens = parse_market_tokens(&market);
    if tokens.is_empty() {
        println!("No outcome tokens reported for this market");
    } else {
        println!("Outcomes:");
        for token in &tokens {
            println!("  {}:", token.outcome);
            println!(
                "    Token ID: {}",
                token.token_id.as_deref().unwrap_or("N/A")
            );
            match token.price {
                Some(price) => println!("    Price: ${}", price),
                None => println!("    Price: N/A"),
            }
        }
    }

    println!();
    println!("Volume: ${}", market.volume.as_deref().unwrap_or("N/A"));
    println!(
        "Liquidity: ${}",
        market.liquidity.as_deref().unwrap_or("N/A")
    );
    println!("End Date: {}", market.end_date.as_deref().unwrap_or("N/A"));
    println!("======================================================================");

    Ok(())
}

/// Show the contracts a trading wallet must approve.
fn cmd_check_allowances() -> anyhow::Result<()> {
    let targets = allowances::allowance_targets();

    println!("=== Token Allowances ===");
    println!("To trade on Polymarket, the wallet must approve these contracts:");
    println!();
    println!("USDC Token: {}", targets.usdc);
    println!("Conditional Tokens: {}", targets.conditional_tokens);
    println!();
    println!("Contracts to approve:");
    for (name, address) in targets.exchanges {
        println!("  {}: {}", name, address);
    }
    println!();
    println!("Check your allowances on PolygonScan:");
    println!("  {}", allowances::polygonscan_url());

    Ok(())
}
