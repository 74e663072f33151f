//! Service binary: configuration → logging → artifacts → listener.
//!
//! Startup is an explicit phase: the artifact set is loaded and cached
//! before the listener starts accepting connections, so request handlers
//! only ever read immutable shared state. Any startup failure is fatal —
//! the service has no degraded mode without its artifacts.

use flopred_service::logging::{self, Component, LogLevel};
use flopred_service::{config, loader, server, verify};

#[tokio::main]
async fn main() {
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    };

    let level = LogLevel::parse(&config.logging.level).unwrap_or(LogLevel::Info);
    logging::init_logger(level, config.logging.file.as_deref());

    // Verification mode: check the artifact directory and exit.
    if std::env::args().any(|arg| arg == "--verify") {
        let report = verify::run_full_verification(&config.artifacts.dir);
        verify::print_summary(&report);
        if report.summary.variants_failed > 0 {
            std::process::exit(1);
        }
        return;
    }

    logging::info(Component::System, None, "starting forecast service");

    let artifacts = match loader::load_artifacts_from(&config.artifacts.dir) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            logging::log_artifact_failure(&e);
            std::process::exit(1);
        }
    };
    logging::info(
        Component::Artifacts,
        None,
        &format!(
            "artifact set loaded from {} and cached for the process lifetime",
            config.artifacts.dir.display()
        ),
    );

    if let Err(e) = server::run_server(&config.server, artifacts).await {
        logging::error(Component::Http, None, &format!("server error: {}", e));
        std::process::exit(1);
    }
}
