//! Logger initialization.

use log::LevelFilter;
use std::io::Write;

/// Initialize `env_logger` with `level` layered over `RUST_LOG`.
///
/// Uses `try_init` so a second call (tests) is harmless.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info.min(level));
    builder.filter_module("hyper", LevelFilter::Warn.min(level));
    builder.filter_module("rustls", LevelFilter::Warn.min(level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()
}
