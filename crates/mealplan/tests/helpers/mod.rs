use recipebox_recipe::{NewRecipe, Recipe};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    recipebox_db::migrate(&pool).await?;

    Ok(pool)
}

pub async fn create_recipe(pool: &SqlitePool, title: &str) -> anyhow::Result<Recipe> {
    let input: NewRecipe = serde_json::from_value(serde_json::json!({ "title": title }))?;

    Ok(recipebox_recipe::Command::sqlite(pool.clone())
        .create(input)
        .await?)
}
