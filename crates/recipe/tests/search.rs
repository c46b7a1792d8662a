use recipebox_recipe::{
    Query,
    filter::{CookingTime, RecipeFilter},
};
use recipebox_shared::recipe::{DietaryRestriction, MealType};

#[tokio::test]
async fn test_search_fixtures() -> anyhow::Result<()> {
    let query = Query::with_fixtures()?;

    let all = query.search("", &RecipeFilter::default()).await?;
    assert_eq!(all.len(), query.list().await?.len());

    let flour = query.search("flour", &RecipeFilter::default()).await?;
    assert!(!flour.is_empty());
    for recipe in &flour {
        let hit = recipe.title.to_lowercase().contains("flour")
            || recipe.description.to_lowercase().contains("flour")
            || recipe
                .ingredients
                .iter()
                .any(|i| i.name.to_lowercase().contains("flour"));
        assert!(hit, "{} does not mention flour", recipe.title);
    }

    let quick_dinners = query
        .search(
            "",
            &RecipeFilter {
                meal_type: vec![MealType::Dinner],
                cooking_time: vec![CookingTime::UpTo30, CookingTime::UpTo60],
                ..Default::default()
            },
        )
        .await?;
    assert!(quick_dinners.iter().all(|r| r.total_time() <= 60));
    assert!(
        quick_dinners
            .iter()
            .all(|r| r.meal_type.contains(&MealType::Dinner))
    );

    let slow = query
        .search(
            "",
            &RecipeFilter {
                cooking_time: vec![CookingTime::Over120],
                dietary_restrictions: vec![DietaryRestriction::HighProtein],
                ..Default::default()
            },
        )
        .await?;
    assert!(slow.iter().all(|r| r.total_time() > 120));

    Ok(())
}
