use std::io;

use memsim_cli::{demo, repl, Session};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env("MEMSIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), stdout.lock())?;

    print!("{}", demo::run(&demo::DEMO_TRACE)?);
    Ok(())
}
