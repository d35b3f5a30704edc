use crate::shared::config;
use crate::shared::data::db::build_sqlite_url;
use sqlx::sqlite::SqlitePool;
use std::path::PathBuf;

fn candidate_migrations_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.join("migrations"));
        }
    }

    dirs.push(PathBuf::from("migrations"));
    dirs.push(PathBuf::from("../../migrations"));
    dirs.push(PathBuf::from("../../../migrations"));

    dirs
}

/// Apply every pending migration from the first `migrations/` directory found.
///
/// A missing directory is not fatal: the record store is owned by the admin
/// application and may already be fully migrated.
pub async fn run_migrations(cfg: &config::Config) -> anyhow::Result<()> {
    let Some(migrations_dir) = candidate_migrations_dirs()
        .into_iter()
        .find(|p| p.exists() && p.is_dir())
    else {
        tracing::warn!("migrations directory not found, skipping schema migration");
        return Ok(());
    };

    let db_path = config::get_database_path(cfg)?;
    let pool = SqlitePool::connect(&build_sqlite_url(&db_path)).await?;

    tracing::info!("Using migrations directory: {}", migrations_dir.display());

    let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path()).await?;
    migrator.run(&pool).await?;
    pool.close().await;

    tracing::info!("Database migrations applied successfully");
    Ok(())
}
