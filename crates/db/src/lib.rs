//! SQLite pool factory and startup migration runner.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use hondana_kernel::settings::DatabaseSettings;
use hondana_kernel::Migration;

/// Open the connection pool, creating the database file when missing.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .context("failed to open database pool")?;

    tracing::info!(url = %settings.url, "database pool ready");

    Ok(pool)
}

const LEDGER_DDL: &str = "\
CREATE TABLE IF NOT EXISTS schema_migrations (
    module       TEXT NOT NULL,
    migration_id TEXT NOT NULL,
    PRIMARY KEY (module, migration_id)
)";

/// Apply module migrations that have not run yet. Applied migrations are
/// recorded in the `schema_migrations` ledger, so a second run is a no-op.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    sqlx::query(LEDGER_DDL)
        .execute(pool)
        .await
        .context("failed to create migrations ledger")?;

    for (module, migration) in migrations {
        let applied = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM schema_migrations WHERE module = ? AND migration_id = ?",
        )
        .bind(module)
        .bind(migration.id)
        .fetch_one(pool)
        .await
        .context("failed to read migrations ledger")?;

        if applied > 0 {
            tracing::debug!(module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool
            .begin()
            .await
            .context("failed to begin migration transaction")?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;

        sqlx::query("INSERT INTO schema_migrations (module, migration_id) VALUES (?, ?)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .context("failed to record migration")?;

        tx.commit()
            .await
            .context("failed to commit migration transaction")?;

        tracing::info!(module = %module, id = migration.id, "applied migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    fn test_migrations() -> Vec<(String, Migration)> {
        vec![(
            "test".to_string(),
            Migration {
                id: "001_init",
                up: "CREATE TABLE IF NOT EXISTS widgets (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
            },
        )]
    }

    #[tokio::test]
    async fn migrations_create_schema() {
        let pool = memory_pool().await;
        run_migrations(&pool, &test_migrations()).await.unwrap();

        sqlx::query("INSERT INTO widgets (name) VALUES ('w')")
            .execute(&pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = memory_pool().await;
        let migrations = test_migrations();

        run_migrations(&pool, &migrations).await.unwrap();
        run_migrations(&pool, &migrations).await.unwrap();

        let recorded = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(recorded, 1);
    }
}
