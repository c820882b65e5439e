//! `skill-octagon` - interactive skill profile shell on stdin.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, trace};

use skill_octagon::adapters::{BroadcastStoreEvents, FileSnapshotStorage, InMemorySnapshotStorage};
use skill_octagon::application::{execute, Command, MergeSession, ProfileService, Reply};
use skill_octagon::config::{AppConfig, LoggingConfig, StorageBackend};
use skill_octagon::ports::SnapshotStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let storage: Arc<dyn SnapshotStorage> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileSnapshotStorage::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemorySnapshotStorage::new()),
    };
    info!(
        "Using {:?} storage, slot '{}'",
        config.storage.backend, config.storage.key
    );

    let mut service = ProfileService::open(storage, config.storage.key.clone()).await;

    let events = Arc::new(BroadcastStoreEvents::new());
    service.subscribe(events.clone());
    let mut receiver = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = receiver.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => trace!(event = %json, "Store event"),
                Err(e) => trace!("Unserializable store event {:?}: {}", event, e),
            }
        }
    });

    let mut merge = MergeSession::new();
    let merge_delay = config.merge.animation_delay();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"Type 'help' for commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }

        let result = match line.parse::<Command>() {
            Ok(command) => execute(command, &mut service, &mut merge, merge_delay).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Reply::Text(text)) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Ok(Reply::Quit) => break,
            Err(e) => {
                stdout.write_all(format!("error: {}\n", e).as_bytes()).await?;
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    merge.reset();
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);

    let _ = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
