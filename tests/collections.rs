use axum::http::{Method, StatusCode};
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

use helpers::{create_recipe, send};

#[tokio::test]
async fn test_toggle_save() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let recipe = create_recipe(&app, json!({"title": "Ramen"})).await?;
    let id = recipe["Id"].as_i64().unwrap();
    let uri = format!("/api/recipes/{id}/save");

    let (status, json) = send(&app, Method::POST, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["saved"], true);
    assert_eq!(json["savedRecipe"]["recipeId"], id);
    assert_eq!(json["savedRecipe"]["folderId"], serde_json::Value::Null);

    let (_, json) = send(&app, Method::GET, &format!("/api/recipes/{id}"), None).await?;
    assert_eq!(json["isSaved"], true);

    let (_, json) = send(&app, Method::POST, &uri, None).await?;
    assert_eq!(json["saved"], false);

    let (_, json) = send(&app, Method::GET, "/api/saved", None).await?;
    assert!(json.as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::POST, "/api/recipes/404/save", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_folders_and_saved_listing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let tacos = create_recipe(
        &app,
        json!({"title": "Fish Tacos", "description": "Crispy cod"}),
    )
    .await?;
    let curry = create_recipe(&app, json!({"title": "Green Curry"})).await?;

    let mut saved_ids = vec![];
    for recipe in [&tacos, &curry] {
        let uri = format!("/api/recipes/{}/save", recipe["Id"]);
        let (_, json) = send(&app, Method::POST, &uri, None).await?;
        saved_ids.push(json["savedRecipe"]["Id"].as_i64().unwrap());
    }

    let (status, folder) = send(
        &app,
        Method::POST,
        "/api/folders",
        Some(json!({"name": "Weeknight"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let folder_id = folder["Id"].as_i64().unwrap();

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/api/saved/{}/folder", saved_ids[0]),
        Some(json!({"folderId": folder_id})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["folderId"], folder_id);

    let (_, json) = send(
        &app,
        Method::GET,
        &format!("/api/saved?folderId={folder_id}"),
        None,
    )
    .await?;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Fish Tacos");
    assert_eq!(json[0]["savedId"], saved_ids[0]);

    let (_, json) = send(&app, Method::GET, "/api/saved?folderId=root", None).await?;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Green Curry");

    let (_, json) = send(&app, Method::GET, "/api/saved?term=CRISPY", None).await?;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/saved?folderId=abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = send(&app, Method::GET, "/api/folders", None).await?;
    assert_eq!(json["folders"][0]["name"], "Weeknight");
    assert_eq!(json["folders"][0]["recipeCount"], 1);

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/api/folders/{folder_id}"),
        Some(json!({"name": "  Quick dinners "})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Quick dinners");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/folders/{folder_id}"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, Method::GET, "/api/saved?folderId=root", None).await?;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/saved/{}", saved_ids[1]),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, Method::GET, "/api/saved", None).await?;
    assert_eq!(json.as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_folder_nesting_is_one_level() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let (_, parent) = send(
        &app,
        Method::POST,
        "/api/folders",
        Some(json!({"name": "Baking"})),
    )
    .await?;
    let parent_id = parent["Id"].as_i64().unwrap();

    let (status, child) = send(
        &app,
        Method::POST,
        "/api/folders",
        Some(json!({"name": "Bread", "parentId": parent_id})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/folders",
        Some(json!({"name": "Sourdough", "parentId": child["Id"]})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");

    let (_, json) = send(
        &app,
        Method::GET,
        &format!("/api/folders?parentId={parent_id}"),
        None,
    )
    .await?;
    assert_eq!(json["folders"][0]["name"], "Bread");
    assert_eq!(json["breadcrumbs"][0]["name"], "Baking");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/folders",
        Some(json!({"name": " "})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}
