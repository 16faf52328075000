use std::process::ExitCode;

use configs::{AppConfig, ServerConfig};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};
use uuid::Uuid;

const SERVICE: &str = "student-records";

fn install_panic_hook(instance: Uuid) {
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %instance, message = %info, "unhandled panic");
    }));
}

fn build_runtime(server: &ServerConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all().thread_name("student-worker");
    if let Some(threads) = server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

/// Resolves on the first Ctrl+C; a failing signal handler never resolves so
/// the server keeps running.
async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(service = SERVICE, event = "shutdown_signal", "Ctrl+C received, draining requests"),
        Err(e) => {
            warn!(service = SERVICE, event = "signal_unavailable", error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    install_panic_hook(instance);

    // One configuration for the runtime and the server alike
    let cfg: AppConfig = match server::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(&cfg.server) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        addr = %cfg.server.bind_addr(),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "student records service starting"
    );

    match rt.block_on(server::run(cfg, ctrl_c())) {
        Ok(()) => {
            info!(service = SERVICE, event = "stop", %instance, "stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = SERVICE, event = "run_failed", %instance, error = %format!("{e:#}"), "server exited with error");
            ExitCode::FAILURE
        }
    }
}
