//! connection-cli
//!
//! Probes one service and reports whether it is reachable.
//!
//! ```text
//!     argv + env
//!         │
//!         ▼
//!   ┌──────────┐    ┌────────────┐    ┌──────────────────────────────┐
//!   │  config  │───▶│ dispatcher │───▶│ mysql │ postgres │ redis │    │
//!   │ resolver │    │  (probe)   │    │ port  │ http               │    │
//!   └──────────┘    └────────────┘    └──────────────┬───────────────┘
//!                                                     │ with_deadline
//!                                                     ▼
//!                                         stdout / stderr + exit code
//! ```

use std::process::ExitCode;

use connection_cli::config::{loader, resolve, Cli};
use connection_cli::observability::Logging;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut cli = match Cli::parse_normalized(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.version {
        println!("Connection CLI version {}", VERSION);
        return ExitCode::SUCCESS;
    }

    let log_path = loader::log_path(&cli, |key| std::env::var(key).ok());
    let logging = Logging::init(log_path.as_deref());

    loader::apply_process_env(&mut cli);

    let code = execute(&cli).await;
    logging.shutdown().await;
    code
}

async fn execute(cli: &Cli) -> ExitCode {
    if cli.wants_help() {
        println!(
            "Connection CLI {} - A tool for testing connectivity to various services\n",
            VERSION
        );
        println!("{}", Cli::help_text());
        return ExitCode::SUCCESS;
    }

    let request = match resolve(cli) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match connection_cli::run(&request).await {
        Ok(()) => {
            println!("Successfully connected to {}", request.mode);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(mode = %request.mode, kind = ?e.kind(), error = %e, "Connection test failed");
            eprintln!("Error: Connection test failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
