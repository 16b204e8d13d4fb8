use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::core::errors::{
    JobTrackError,
    Result,
};

const NOISY_TARGETS: &[(&str, &str)] = &[
    ("reqwest", "warn"),
    ("hyper", "warn"),
    ("hyper_util", "warn"),
    ("h2", "warn"),
    ("eframe", "warn"),
    ("egui_glow", "warn"),
    ("egui_wgpu", "warn"),
    ("wgpu", "warn"),
    ("winit", "warn"),
];

/// `RUST_LOG` wins when set; otherwise `level` plus caps on chatty dependencies.
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut directives = vec![level.to_string()];
    for (target, lvl) in NOISY_TARGETS {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| JobTrackError::Config(format!("invalid log filter '{}': {}", filter_str, e)))
}

pub fn init_logging(level: &str) -> Result<()> {
    let filter = build_env_filter(level)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .map_err(|e| JobTrackError::Config(format!("logging already initialized: {}", e)))
}
