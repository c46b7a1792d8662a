use recipebox_recipe::{NewRecipe, Recipe};
use recipebox_shopping::{Command, NewGroceryItem};
use serde_json::json;
use sqlx::SqlitePool;
use temp_dir::TempDir;

mod helpers;

async fn create_recipe(pool: &SqlitePool, value: serde_json::Value) -> anyhow::Result<Recipe> {
    let input: NewRecipe = serde_json::from_value(value)?;

    Ok(recipebox_recipe::Command::sqlite(pool.clone())
        .create(input)
        .await?)
}

fn flour(quantity: f64) -> NewGroceryItem {
    NewGroceryItem {
        ingredient: "Flour".to_owned(),
        quantity,
        unit: "cup".to_owned(),
        recipe_ids: vec![],
        checked: false,
    }
}

#[tokio::test]
async fn test_add_item_merges_same_product() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = Command::sqlite(pool);

    let mut first = flour(2.0);
    first.ingredient = "flour".to_owned();
    cmd.add_item(first).await?;
    let merged = cmd.add_item(flour(1.0)).await?;

    assert_eq!(merged.quantity, 3.0);
    let items = cmd.list().await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3.0);
    assert_eq!(items[0].ingredient, "flour");

    Ok(())
}

#[tokio::test]
async fn test_add_two_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = Command::sqlite(pool.clone());

    let cake = create_recipe(
        &pool,
        json!({
            "title": "Cake",
            "ingredients": [
                {"name": "Sugar", "amount": 1.0, "unit": "cup"},
                {"name": "Butter", "amount": 0.5, "unit": "cup"},
            ],
        }),
    )
    .await?;
    let tea = create_recipe(
        &pool,
        json!({
            "title": "Sweet Tea",
            "ingredients": [{"name": "sugar", "amount": 0.25, "unit": "cup"}],
        }),
    )
    .await?;

    cmd.add_recipe(&cake).await?;
    let items = cmd.add_recipe(&tea).await?;
    assert_eq!(items.len(), 2);

    let stored = cmd.list().await?;
    assert_eq!(stored, items);
    let sugar = stored.iter().find(|i| i.ingredient == "Sugar").unwrap();
    assert_eq!(sugar.quantity, 1.25);
    assert_eq!(sugar.recipe_ids, vec![cake.id, tea.id]);
    assert!(!sugar.checked);

    Ok(())
}

#[tokio::test]
async fn test_toggle_and_clear() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = Command::sqlite(pool);

    let item = cmd.add_item(flour(1.0)).await?;
    let mut milk = flour(1.0);
    milk.ingredient = "Milk".to_owned();
    cmd.add_item(milk).await?;

    assert!(cmd.toggle(item.id).await?.checked);
    let progress = cmd.progress().await?;
    assert_eq!((progress.completed, progress.total, progress.percent), (1, 2, 50));

    assert_eq!(cmd.clear_completed().await?, 1);
    let items = cmd.list().await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].ingredient, "Milk");

    assert_eq!(cmd.clear_all().await?, 1);
    assert!(cmd.list().await?.is_empty());

    let err = cmd.toggle(item.id).await.unwrap_err();
    assert_eq!(err.to_string(), format!("grocery item {} not found", item.id));

    Ok(())
}

#[tokio::test]
async fn test_fixture_groups() -> anyhow::Result<()> {
    let cmd = Command::with_fixtures()?;

    let groups = cmd.groups().await?;
    let letters: Vec<_> = groups.iter().map(|g| g.letter.as_str()).collect();
    assert_eq!(letters, vec!["E", "F", "O"]);

    let progress = cmd.progress().await?;
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.percent, 33);

    Ok(())
}

#[tokio::test]
async fn test_clear_completed_matches_stored_flag_exactly() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = Command::sqlite(pool.clone());

    sqlx::query(
        "INSERT INTO grocery_item (name, ingredient, quantity, unit, recipe_ids, checked) \
         VALUES ('Eggs - 6 pcs', 'Eggs', 6, 'pcs', '', 'TRUE'), \
                ('Milk - 1 l', 'Milk', 1, 'l', '', 'true')",
    )
    .execute(&pool)
    .await?;

    let items = cmd.list().await?;
    assert!(!items.iter().find(|i| i.ingredient == "Eggs").unwrap().checked);
    assert!(items.iter().find(|i| i.ingredient == "Milk").unwrap().checked);

    assert_eq!(cmd.clear_completed().await?, 1);
    let items = cmd.list().await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].ingredient, "Eggs");

    Ok(())
}
