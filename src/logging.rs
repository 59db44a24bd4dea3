/// Logger setup.
///
/// Filter comes from `RUST_LOG` (default `warn`). The game owns the
/// terminal, so set `CAVERN_LOG=path` to send records to a file instead
/// of stderr; with a file and no `RUST_LOG`, the level defaults to `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Context;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

const LOG_FILE_VAR: &str = "CAVERN_LOG";

pub fn init() -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    if let Some(path) = std::env::var_os(LOG_FILE_VAR).map(PathBuf::from) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
        if std::env::var_os("RUST_LOG").is_none() {
            builder.filter_level(LevelFilter::Info);
        }
    }

    builder.try_init().context("logger already initialised")?;
    Ok(())
}
