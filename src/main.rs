use std::sync::Arc;

use eframe::egui;
use jobtrack::{
    core::{
        columns::ColumnRegistry,
        AppConfig,
    },
    gui::JobTrackApp,
    logging::init_logging,
    store::{
        ApplicationStore,
        MemoryStore,
        RestStore,
    },
    tracker::{
        load_saved_columns,
        Tracker,
    },
};
use tracing::{
    error,
    info,
    warn,
};

fn main() -> eframe::Result<()> {
    let config = AppConfig::load();

    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    let store: Arc<dyn ApplicationStore> = if config.backend.is_configured() {
        info!(url = %config.backend.url, table = config.backend.table(), "using REST backend");
        Arc::new(RestStore::new(config.backend.clone()))
    } else {
        warn!("No backend configured, applications are kept in memory for this session");
        Arc::new(MemoryStore::new("local"))
    };

    let columns =
        if config.persist_columns { load_saved_columns() } else { ColumnRegistry::new() };

    let mut tracker = Tracker::new(runtime.handle().clone(), store, config.timings)
        .with_columns(columns, config.persist_columns);
    tracker.load();

    let display_name = config.backend.display_name.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Job Application Tracker")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "jobtrack",
        options,
        Box::new(move |cc| Ok(Box::new(JobTrackApp::new(cc, tracker, display_name)))),
    );

    runtime.shutdown_background();
    result
}
