use clap::Parser;
use mimalloc::MiMalloc;
use snippetbox_db::cli::Cli;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = cli.load_config()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_path = %cfg.database_path.display(),
        tables = ?cfg.tables,
        dry_run = cli.dry_run,
        assume_yes = cfg.assume_yes
    );

    let options = cfg.init_options(cli.dry_run)?;
    let report = snippetbox_db::db::run(&options)
        .await
        .inspect_err(|e| error!(error = %e, "schema initialization failed"))?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
