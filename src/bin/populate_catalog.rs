//! Reset the catalog tables and load the baseline data

use locallibrary_server::{config::AppConfig, repository::Repository, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("locallibrary_server={}", config.logging.level).into()
            }),
        )
        .init();

    let repository = Repository::connect(&config.database).await?;

    seed::clean_db(&repository).await?;
    seed::populate(&repository).await?;

    let counts = locallibrary_server::services::catalog::CatalogService::new(
        repository,
        config.catalog.clone(),
    )
    .counts()
    .await?;
    tracing::info!(
        "Catalog now holds {} books by {} authors",
        counts.num_books,
        counts.num_authors
    );

    Ok(())
}
