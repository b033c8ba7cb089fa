use std::sync::Arc;

use tokio::sync::RwLock;

use playerconsole::config::Config;
use playerconsole::server;
use playerconsole::store::PlayerStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    setup_logging(&config)?;

    let store = PlayerStore::load(config.snapshot_path.clone())?;
    log::info!(
        "Loaded {} player records from {}",
        store.len(),
        config.snapshot_path.display()
    );

    let store = Arc::new(RwLock::new(store));
    server::start(&config, store).await
}

fn setup_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Utc::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .chain(fern::log_file(&config.log_path)?)
        .apply()?;
    Ok(())
}
