//! `dinehub` entry point: environment, logging and config are resolved once
//! here, then handed to [`server::run`] on a runtime sized from that config.
use std::process::ExitCode;

use tracing::{error, info};
use uuid::Uuid;

fn install_panic_hook(instance: Uuid) {
    std::panic::set_hook(Box::new(move |panic| {
        error!(event = "panic", %instance, message = %panic, "unhandled panic");
    }));
}

fn runtime(worker_threads: Option<usize>) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = worker_threads {
        builder.worker_threads(n);
    }
    builder.build()
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    install_panic_hook(instance);

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let rt = match runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "dinehub starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(event = "stop", %instance, "dinehub stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", %instance, error = %e, "dinehub exited with error");
            ExitCode::FAILURE
        }
    }
}
