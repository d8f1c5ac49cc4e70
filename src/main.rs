use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use auction_dapp_sync::setup_controller;
use auction_dapp_sync::sync::domain::{Action, DEFAULT_BID};
use auction_dapp_sync::sync::gateway::InMemoryGateway;
use auction_dapp_sync::sync::notify::LogSink;
use auction_dapp_sync::sync::runtime::{ActionOutcome, SyncController};
use auction_dapp_sync::sync::types::{AccountId, Balance};
use auction_dapp_sync::view::DashboardView;

#[derive(Subcommand, Clone, Debug)]
enum Command {
    /// Print the dashboard after the initial load
    Show,
    /// Re-fetch every field
    Refresh,
    /// Re-fetch bid, bidder, owner and sold status
    Status,
    /// Place a bid
    Bid {
        #[arg(long, default_value_t = DEFAULT_BID)]
        amount: Balance,
    },
    /// Change the product name
    SetName { name: String },
    /// Sell the product to the current bidder
    Finalize,
    /// Take back a losing bid
    Reclaim,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the initial contract state
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Signing account; actions are refused without one
    #[arg(long)]
    caller: Option<AccountId>,

    /// Start without a chain connection
    #[arg(long)]
    disconnected: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("[MAIN] Command: {:?}", args.command);

    let controller = setup_controller(
        args.fixture.as_deref(),
        args.caller.clone(),
        !args.disconnected,
        Arc::new(LogSink),
    )
    .await?;

    match args.command {
        Command::Show => {}
        Command::Refresh => controller.refresh_all().await,
        Command::Status => controller.refresh_auction_status().await,
        Command::Bid { amount } => run_action(&controller, Action::Bid(amount)).await,
        Command::SetName { name } => run_action(&controller, Action::SetProductName(name)).await,
        Command::Finalize => run_action(&controller, Action::Finalize).await,
        Command::Reclaim => run_action(&controller, Action::Reclaim).await,
    }

    println!("{}", DashboardView::from_snapshot(&controller.snapshot()));
    Ok(())
}

async fn run_action(controller: &SyncController<InMemoryGateway>, action: Action) {
    let report = controller.perform(action).await;
    match report.outcome {
        ActionOutcome::Confirmed(receipt) => println!("[MAIN] Included in block {}", receipt),
        ActionOutcome::Failed(e) => println!("[MAIN] Transaction failed: {}", e),
        ActionOutcome::Rejected => println!("[MAIN] Not submitted: wallet not connected"),
        ActionOutcome::Busy => println!("[MAIN] Not submitted: another action is in progress"),
    }
    if report.reset_form {
        println!("[MAIN] Product name form cleared");
    }
}
