use pricing_admin::{Command, execute, open_service, setup_environment};
use shared::error::AppError;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<AppError>() {
            Some(app) => {
                eprintln!("error {}: {}", app.code, app.message);
                if let Some(details) = &app.details
                    && let Ok(details) = serde_json::to_string_pretty(details)
                {
                    eprintln!("{}", details);
                }
            }
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // 1. dotenv, work directory, logging
    let config = setup_environment()?;

    // 2. command line
    let command = Command::parse(std::env::args().skip(1))?;

    // 3. stores; the global configuration is created on first use
    let service = open_service(&config);
    if service.initialize_global().await? {
        tracing::info!(path = %config.settings_file.display(), "Initialized pricing settings");
    }

    let output = execute(&service, command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
