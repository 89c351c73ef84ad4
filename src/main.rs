use std::path::PathBuf;

use chansweep::config::{parse_earliest_date, NoticeTexts, SweepConfig};
use chansweep::sweep::Sweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let slack_name = std::env::var("SLACK_WORKSPACE").unwrap_or_else(|_| {
        eprintln!("Error: SLACK_WORKSPACE not set");
        eprintln!("  export SLACK_WORKSPACE=yourteam   # yourteam.slack.com");
        std::process::exit(1);
    });

    let api_token = std::env::var("SLACK_API_TOKEN").ok();
    let token_file = std::env::var("SLACK_API_TOKEN_FILE").ok().map(PathBuf::from);

    let mode = std::env::var("SWEEP_MODE").unwrap_or_else(|_| "list".to_string());

    let days: u32 = std::env::var("SWEEP_DAYS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(30);

    let closure_path = PathBuf::from(
        std::env::var("SWEEP_CLOSURE_FILE").unwrap_or_else(|_| "closure.txt".to_string()),
    );
    let warning_path = PathBuf::from(
        std::env::var("SWEEP_WARNING_FILE").unwrap_or_else(|_| "warning.txt".to_string()),
    );

    let mut config = SweepConfig::new(slack_name, api_token, token_file.as_deref()).await?;

    if let Ok(raw) = std::env::var("SWEEP_IGNORE_USERS") {
        config.ignored_users = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Ok(raw) = std::env::var("SWEEP_EARLIEST_ARCHIVE_DATE") {
        config.earliest_archive_date = parse_earliest_date(&raw)?;
    }

    let notices = NoticeTexts::load(&closure_path, &warning_path).await?;

    eprintln!("🧹 chansweep v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Workspace: {}.slack.com", config.slack_name);
    eprintln!("   Mode: {} ({} day window)", mode, days);
    eprintln!("   Earliest archive date: {}", config.earliest_archive_date);
    eprintln!("   Ignored users: {}\n", config.ignored_users.join(", "));

    let sweeper = Sweeper::from_config(&config, notices);
    let snapshot = sweeper.snapshot().await?;
    tracing::info!(channels = snapshot.len(), "Channel snapshot taken");

    match mode.as_str() {
        "list" => {
            let stale = sweeper.list_stale(&snapshot, days).await?;
            for name in &stale {
                println!("{name}");
            }
            eprintln!("\n{} stale channel(s)", stale.len());
        }
        "warn" => sweeper.run_warn_all(&snapshot, days).await?,
        "archive" => sweeper.run_archive_all(&snapshot, days).await?,
        other => {
            eprintln!("Error: unknown SWEEP_MODE '{other}' (expected list, warn, or archive)");
            std::process::exit(1);
        }
    }

    Ok(())
}
