use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum Recipe {
    Table,
    Id,
    Name,
    Title,
    Description,
    ImageUrl,
    PrepTime,
    CookTime,
    Servings,
    Difficulty,
    MealType,
    DietaryRestrictions,
    Rating,
    ReviewCount,
    Ingredients,
    Instructions,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Review {
    Table,
    Id,
    Name,
    RecipeId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum SavedRecipe {
    Table,
    Id,
    Name,
    RecipeId,
    FolderId,
    Title,
    ImageUrl,
    SavedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Folder {
    Table,
    Id,
    Name,
    ParentId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum GroceryItem {
    Table,
    Id,
    Name,
    Ingredient,
    Quantity,
    Unit,
    RecipeIds,
    Checked,
}

#[derive(Iden, Clone, Copy)]
pub enum MealPlan {
    Table,
    Id,
    Name,
    RecipeId,
    Date,
    TimeSlot,
    Notes,
    CreatedAt,
}
