//! Embedded schema migrations for the orders database

use anyhow::{Context, Result};
use sqlx::{Connection, SqliteConnection};
use std::collections::{BTreeMap, HashSet};

/// A single forward migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
}

/// Migration status in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub checksum: String,
}

/// Load all available migrations from the embedded files
pub fn load_migrations() -> BTreeMap<i64, Migration> {
    let mut migrations = BTreeMap::new();

    migrations.insert(1, Migration {
        version: 1,
        name: "clean_orders".to_string(),
        up_sql: include_str!("files/001_clean_orders/up.sql").to_string(),
    });

    migrations.insert(2, Migration {
        version: 2,
        name: "order_date_index".to_string(),
        up_sql: include_str!("files/002_order_date_index/up.sql").to_string(),
    });

    migrations
}

/// Initialize the migration tracking table
pub async fn init_migration_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            checksum TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await
    .context("Failed to create schema_migrations table")?;

    Ok(())
}

/// Get list of applied migrations
pub async fn get_applied_migrations(conn: &mut SqliteConnection) -> Result<Vec<AppliedMigration>> {
    let migrations = sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, name, checksum FROM schema_migrations ORDER BY version",
    )
    .fetch_all(&mut *conn)
    .await
    .context("Failed to get applied migrations")?;

    Ok(migrations)
}

/// Calculate checksum for migration SQL
pub fn calculate_checksum(sql: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    sql.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

/// Apply every pending migration, returning how many were applied
pub async fn migrate_up(conn: &mut SqliteConnection) -> Result<usize> {
    init_migration_table(conn).await?;

    let available = load_migrations();
    let applied = get_applied_migrations(conn).await?;

    for applied_migration in &applied {
        match available.get(&applied_migration.version) {
            Some(migration) => {
                let expected = calculate_checksum(&migration.up_sql);
                if applied_migration.checksum != expected {
                    anyhow::bail!(
                        "Migration {} checksum mismatch! Applied: {}, Expected: {}",
                        applied_migration.version,
                        applied_migration.checksum,
                        expected
                    );
                }
            }
            None => anyhow::bail!(
                "Applied migration {} '{}' not found in available migrations",
                applied_migration.version,
                applied_migration.name
            ),
        }
    }

    let applied_versions: HashSet<i64> = applied.iter().map(|m| m.version).collect();
    let mut count = 0;

    for (version, migration) in available {
        if applied_versions.contains(&version) {
            continue;
        }

        log::info!("Applying migration {} '{}'", version, migration.name);
        let mut tx = conn.begin().await.context("Failed to start transaction")?;

        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to apply migration {} '{}'", version, migration.name))?;

        sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(version)
            .bind(&migration.name)
            .bind(calculate_checksum(&migration.up_sql))
            .execute(&mut *tx)
            .await
            .context("Failed to record migration")?;

        tx.commit().await.context("Failed to commit migration")?;
        count += 1;
    }

    Ok(count)
}
