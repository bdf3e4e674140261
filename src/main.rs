use std::path::{Path, PathBuf};

use critical_alert_worker::{
    consts::DEFAULT_LOG_FILTER,
    core::init_tracing,
    run_event_stream,
    settings::{read_settings, settings_path_from_env},
    LoggingHost, Result,
};
use tokio::io::{self, AsyncRead, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let settings_path = settings_path_from_env();
    let settings = match read_settings(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(DEFAULT_LOG_FILTER);
            error!(?settings_path, error = %err, "failed to load worker settings");
            return Err(err);
        }
    };
    init_tracing(&settings.log_filter);
    let settings_found = settings_path.as_deref().is_some_and(Path::exists);
    info!(?settings_path, settings_found, "critical alert worker starting");

    let events_path = std::env::args_os().nth(1).map(PathBuf::from);
    let reader: Box<dyn AsyncRead + Unpin> = match &events_path {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(io::stdin()),
    };

    let host = LoggingHost::new(settings.clone());
    let summary = run_event_stream(BufReader::new(reader), &host, &settings).await?;
    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
