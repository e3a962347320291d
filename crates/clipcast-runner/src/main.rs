use std::path::Path;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use clipcast_core::{ClipcastConfig, SystemClock};
use clipcast_library::{DriveLibrary, ServiceAccount};
use clipcast_publisher::UploadTool;
use clipcast_runner::cycle::{Cycle, CycleOutcome, SCHEDULE_DOC, USED_DOC};
use clipcast_scheduler::SlotPlanner;

/// Scheduled video publisher — one posting cycle per invocation.
#[derive(Parser)]
#[command(name = "clipcast")]
struct Args {
    /// Path to clipcast.toml (default: ~/.clipcast/clipcast.toml).
    #[arg(long)]
    config: Option<String>,
    /// Publish immediately even when no slot window is open.
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipcast=info".into()),
        )
        .init();

    let args = Args::parse();

    // config: explicit flag > CLIPCAST_CONFIG env > ~/.clipcast/clipcast.toml
    let config_path = args.config.or_else(|| std::env::var("CLIPCAST_CONFIG").ok());
    let config = ClipcastConfig::load(config_path.as_deref())?;
    config.validate()?;

    let offset = config.schedule.offset()?;
    let clock = SystemClock::new(offset);

    let account = ServiceAccount::from_base64(&config.library.service_account_b64)?;
    let library = DriveLibrary::new(account, config.library.folder_ids.clone());
    let publisher = UploadTool::new(&config.publish);

    let state_dir = Path::new(&config.state.dir);
    let planner = SlotPlanner::new(
        state_dir.join(SCHEDULE_DOC),
        config.schedule.hours.clone(),
        config.schedule.grace_minutes,
    );

    let cycle = Cycle::new(
        &planner,
        state_dir.join(USED_DOC),
        &library,
        &publisher,
        &clock,
        &config.publish,
        args.force || config.force,
    );

    let mut rng = StdRng::from_entropy();
    match cycle.run(&mut rng).await? {
        CycleOutcome::NotTime => info!("cycle finished: not a posting time"),
        CycleOutcome::LibraryEmpty => info!("cycle finished: library is empty"),
        CycleOutcome::NothingPicked => info!("cycle finished: nothing to pick"),
        CycleOutcome::Published {
            candidate_id,
            fallback,
        } => info!(%candidate_id, fallback, "cycle finished: published"),
        CycleOutcome::PublishFailed { detail } => {
            // The slot and candidate stay eligible — the next invocation
            // retries them, so this is a reported failure, not a crash.
            error!(%detail, "cycle finished: publish failed");
        }
    }

    Ok(())
}
