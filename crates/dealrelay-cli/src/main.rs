mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dealrelay_affiliate::AffiliateResolver;
use dealrelay_core::load_app_config;
use dealrelay_deals::RedirectResolver;
use dealrelay_rewrite::CopyRewriter;
use dealrelay_telegram::GatewayClient;

use crate::run::RunController;

const USER_AGENT: &str = "dealrelay/0.1 (relay)";
const GATEWAY_TIMEOUT_SECS: u64 = 30;
const REDIRECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Parser)]
#[command(name = "dealrelay")]
#[command(about = "Scheduled deal relay: scan source channels, republish monetized deals")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan all source channels once, then exit.
    Run {
        /// Execute every decision but log instead of sending.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config errors are the only fatal category: abort before any
    // collaborator call.
    let mut config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(Commands::Run { dry_run }) = cli.command {
        config.dry_run = config.dry_run || dry_run;
    }

    let gateway = GatewayClient::new(&config.api_base, &config.bot_token, GATEWAY_TIMEOUT_SECS)?;
    let redirects = RedirectResolver::new(REDIRECT_TIMEOUT_SECS, USER_AGENT)?;
    let affiliates = AffiliateResolver::from_config(&config)?;
    if affiliates.is_empty() {
        tracing::warn!(
            "no affiliate strategies configured; every candidate will be skipped \
             (set AFFILIATE_API_ENDPOINT, AFFILIATE_PORTAL_LINK, or AFFILIATE_LINK_PREFIX)"
        );
    }
    let rewriter = CopyRewriter::from_config(&config)?;

    let controller = RunController::new(&config, &gateway, &redirects, &affiliates, &rewriter);
    let report = controller.execute().await;

    tracing::info!(
        published = report.published,
        skipped = report.skipped,
        "dealrelay run complete"
    );

    Ok(())
}
