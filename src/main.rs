use mess_ledger::{
    config::{database, identity, settings},
    core::report,
    errors::Result,
    session::MessSession,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load mess settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(
        "Loaded settings for '{}' (clear strategy: {:?})",
        settings.name, settings.clear_strategy
    );

    // 4. Connect and ensure tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Load the configured identity's records
    let mut session = MessSession::new(db, settings);
    let Some(owner_id) = identity::get_owner_identity() else {
        warn!("MESS_OWNER_ID is not set; nothing to report");
        return Ok(());
    };
    session.on_identity_change(Some(owner_id)).await?;

    // 6. Print the current month's settlement
    let symbol = session.settings().currency_symbol.clone();
    let summary = session.ledger().summary();
    print!(
        "{}",
        report::format_month_summary(&session.settings().name, &summary, &symbol)
    );
    println!();
    print!("{}", report::format_member_table(&session.report(), &symbol));

    Ok(())
}
