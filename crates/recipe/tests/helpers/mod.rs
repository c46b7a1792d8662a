use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    recipebox_db::migrate(&pool).await?;

    Ok(pool)
}

pub fn new_recipe(value: serde_json::Value) -> recipebox_recipe::NewRecipe {
    serde_json::from_value(value).unwrap()
}
