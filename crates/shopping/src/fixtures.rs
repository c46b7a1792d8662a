use recipebox_shared::Result;

use crate::GroceryRow;

pub fn grocery_items() -> Result<Vec<GroceryRow>> {
    Ok(serde_json::from_str(include_str!(
        "../fixtures/grocery_items.json"
    ))?)
}
