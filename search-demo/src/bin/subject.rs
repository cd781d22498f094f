//! Subject catalog demo: index two films, search by genre.

use dotenv::dotenv;
use tracing::{error, info};

use search_demo::catalog::subject;
use search_demo::{demo, telemetry, DemoError, Dependencies, Settings};

async fn run() -> Result<(), DemoError> {
    let settings = Settings::from_env()?;
    let dependencies = Dependencies::new(&settings).await?;

    let stdout = std::io::stdout();
    let report = demo::run(&dependencies.client, &subject::plan(), &mut stdout.lock()).await?;

    info!(total = report.total, written = report.written, "Subject demo finished");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    telemetry::init();

    if let Err(e) = run().await {
        error!("Subject demo failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
