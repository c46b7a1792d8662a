use axum::http::{Method, StatusCode};
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

use helpers::{create_recipe, send};

#[tokio::test]
async fn test_grocery_from_two_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let brownies = create_recipe(
        &app,
        json!({
            "title": "Brownies",
            "ingredients": [
                {"name": "Sugar", "amount": 1.0, "unit": "cup"},
                {"name": "Cocoa", "amount": 0.5, "unit": "cup"}
            ]
        }),
    )
    .await?;
    let lemonade = create_recipe(
        &app,
        json!({
            "title": "Lemonade",
            "ingredients": [{"name": "sugar", "amount": 0.5, "unit": "cup"}]
        }),
    )
    .await?;

    for recipe in [&brownies, &lemonade] {
        let uri = format!("/api/recipes/{}/grocery", recipe["Id"]);
        let (status, _) = send(&app, Method::POST, &uri, None).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = send(&app, Method::GET, "/api/grocery", None).await?;
    assert_eq!(status, StatusCode::OK);

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let sugar = items
        .iter()
        .find(|i| i["ingredient"] == "Sugar")
        .expect("sugar is listed once");
    assert_eq!(sugar["quantity"], 1.5);
    assert_eq!(sugar["recipeIds"], json!([brownies["Id"], lemonade["Id"]]));

    assert_eq!(json["groups"][0]["letter"], "C");
    assert_eq!(json["groups"][1]["letter"], "S");
    assert_eq!(json["progress"]["total"], 2);
    assert_eq!(json["progress"]["completed"], 0);

    Ok(())
}

#[tokio::test]
async fn test_grocery_toggle_and_clear() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let mut ids = vec![];
    for (ingredient, quantity, unit) in [("Flour", 2.0, "cup"), ("Milk", 1.0, "l"), ("Salt", 1.0, "tsp")] {
        let (status, json) = send(
            &app,
            Method::POST,
            "/api/grocery",
            Some(json!({"ingredient": ingredient, "quantity": quantity, "unit": unit})),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(json["Id"].as_i64().unwrap());
    }

    let (_, json) = send(
        &app,
        Method::POST,
        "/api/grocery",
        Some(json!({"ingredient": "flour", "quantity": 1.0, "unit": "cup"})),
    )
    .await?;
    assert_eq!(json["Id"], ids[0]);
    assert_eq!(json["quantity"], 3.0);

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/grocery/{}/toggle", ids[0]),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["checked"], true);

    let (_, json) = send(&app, Method::GET, "/api/grocery", None).await?;
    assert_eq!(json["progress"]["percent"], 33);

    let (_, json) = send(&app, Method::DELETE, "/api/grocery/completed", None).await?;
    assert_eq!(json["removed"], 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/grocery/{}", ids[1]),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/grocery/{}/toggle", ids[1]),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, Method::DELETE, "/api/grocery", None).await?;
    assert_eq!(json["removed"], 1);

    let (_, json) = send(&app, Method::GET, "/api/grocery", None).await?;
    assert!(json["items"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_schedule_and_calendar() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let risotto = create_recipe(&app, json!({"title": "Risotto"})).await?;
    let salad = create_recipe(&app, json!({"title": "Caesar Salad"})).await?;

    let mut entry_ids = vec![];
    for recipe in [&risotto, &salad] {
        let (status, json) = send(
            &app,
            Method::POST,
            "/api/meal-plans",
            Some(json!({"recipeId": recipe["Id"], "date": "2024-06-01", "timeSlot": "dinner"})),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        entry_ids.push(json["Id"].as_i64().unwrap());
    }

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/meal-plans",
        Some(json!({"recipeId": 999, "date": "2024-06-01", "timeSlot": "lunch"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(
        &app,
        Method::GET,
        "/api/meal-plans?start=2024-06-01&end=2024-06-01",
        None,
    )
    .await?;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/meal-plans?start=2024-06-02&end=2024-06-01",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/meal-plans?start=2024-06-02", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/api/meal-plans/{}", entry_ids[1]),
        Some(json!({"date": "2024-06-03", "timeSlot": "lunch", "notes": "light"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["date"], "2024-06-03");
    assert_eq!(json["timeSlot"], "lunch");

    let (status, json) = send(&app, Method::GET, "/api/calendar/2024/6", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["year"], 2024);
    assert_eq!(json["month"], 6);
    assert_eq!(json["previous"]["month"], 5);
    assert_eq!(json["next"]["month"], 7);

    let days = json["days"].as_array().unwrap();
    assert_eq!(days.len(), 42);
    assert_eq!(days[0]["date"], "2024-05-26");
    assert_eq!(days[0]["inMonth"], false);

    let june_first = days.iter().find(|d| d["date"] == "2024-06-01").unwrap();
    assert_eq!(june_first["meals"][0]["recipe"]["title"], "Risotto");
    let june_third = days.iter().find(|d| d["date"] == "2024-06-03").unwrap();
    assert_eq!(june_third["meals"][0]["notes"], "light");

    let (status, _) = send(&app, Method::GET, "/api/calendar/2024/13", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&app, Method::GET, "/api/calendar/9999/12", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/meal-plans/{}", entry_ids[0]),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, Method::GET, "/api/meal-plans", None).await?;
    assert_eq!(json.as_array().unwrap().len(), 1);

    Ok(())
}
