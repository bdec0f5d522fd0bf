#![cfg(not(tarpaulin_include))]

use gradbudget::app;
use std::env;

/// Main entry point for the web application
///
/// Initializes logging and runs the budget-tracker web server. The bind
/// address may be given as the first command line argument and defaults to
/// `127.0.0.1:3000`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let addr = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());

    app::run(&addr).await
}
