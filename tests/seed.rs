use axum::http::{Method, StatusCode};
use temp_dir::TempDir;

mod helpers;

use helpers::send;

#[tokio::test]
async fn test_seed_loads_fixtures_once() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, pool) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let report = recipebox::seed::seed(&pool).await?;
    assert_eq!(report.recipes, 5);
    assert_eq!(report.reviews, 4);
    assert_eq!(report.folders, 2);
    assert_eq!(report.saved_recipes, 3);
    assert_eq!(report.grocery_items, 3);
    assert_eq!(report.meal_plans, 3);

    assert!(recipebox::seed::seed(&pool).await.is_err());

    let (status, json) = send(&app, Method::GET, "/api/recipes?term=flour", None).await?;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = json["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_owned())
        .collect();
    assert!(titles.contains(&"Slow Braised Beef Stew".to_owned()));
    assert!(titles.contains(&"Chocolate Chip Cookies".to_owned()));

    let (_, json) = send(&app, Method::GET, "/api/folders", None).await?;
    assert_eq!(json["folders"].as_array().unwrap().len(), 2);

    let (_, json) = send(&app, Method::GET, "/api/saved?folderId=root", None).await?;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Overnight Oats");

    let (_, json) = send(&app, Method::GET, "/api/calendar/2024/6", None).await?;
    let june_third = json["days"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["date"] == "2024-06-03")
        .unwrap()
        .clone();
    assert_eq!(june_third["meals"].as_array().unwrap().len(), 2);
    assert_eq!(june_third["meals"][0]["timeSlot"], "breakfast");

    Ok(())
}
