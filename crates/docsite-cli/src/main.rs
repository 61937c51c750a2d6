use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    // DOCSITE_LOG takes EnvFilter directives; soft findings log at warn.
    let filter = EnvFilter::try_from_env("DOCSITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match docsite_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("docsite error: {err:#}");
            process::exit(1);
        }
    }
}
