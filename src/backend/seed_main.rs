/**
 * Eventure Seed Entry Point
 *
 * Resets the database named by `DATABASE_URL` to the demo users and events.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use eventure::backend::seed::{seed_demo_data, DEMO_PASSWORD, DEMO_USERS};
    use eventure::backend::server::config::{load_database, ServerConfig};

    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Seeding {}", config.database_url);

    let pool = load_database(&config.database_url).await?;
    let summary = seed_demo_data(&pool, config.bcrypt_cost).await?;
    pool.close().await;

    println!(
        "Seeded {} users and {} events ({} attendees).",
        summary.users, summary.events, summary.attendees
    );
    for (_, name, email) in DEMO_USERS {
        println!("  {} <{}> / {}", name, email, DEMO_PASSWORD);
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Seeding requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin eventure-seed --features ssr");
    std::process::exit(1);
}
