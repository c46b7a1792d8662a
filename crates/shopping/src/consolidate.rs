//! Merging ingredients into a grocery list.
//!
//! An item is identified by its lower-cased ingredient name and its exact
//! unit. Adding an ingredient already on the list sums the quantities and
//! unions the recipe ids, so adding the same recipe twice counts it twice.

use std::collections::BTreeMap;

use recipebox_shared::{Id, recipe::Ingredient};
use serde::Serialize;

use crate::{GroceryItem, NewGroceryItem};

#[derive(Debug, Clone, PartialEq)]
pub enum Merge {
    /// The item at `index` holds the product; `item` is its merged state.
    Existing { index: usize, item: GroceryItem },
    New(NewGroceryItem),
}

pub fn merge_item(items: &[GroceryItem], incoming: NewGroceryItem) -> Merge {
    let Some(index) = items
        .iter()
        .position(|item| item.same_product(&incoming.ingredient, &incoming.unit))
    else {
        return Merge::New(incoming);
    };

    let mut merged = items[index].clone();
    merged.quantity += incoming.quantity;
    for recipe_id in incoming.recipe_ids {
        if !merged.recipe_ids.contains(&recipe_id) {
            merged.recipe_ids.push(recipe_id);
        }
    }

    Merge::Existing {
        index,
        item: merged,
    }
}

/// Applies a merge result to an in-memory list. New items get `id`.
pub fn apply_merge(items: &mut Vec<GroceryItem>, merge: Merge, id: Id) -> GroceryItem {
    match merge {
        Merge::Existing { index, item } => {
            if let Some(slot) = items.get_mut(index) {
                *slot = item.clone();
            }
            item
        }
        Merge::New(new) => {
            let item = new.into_item(id);
            items.push(item.clone());
            item
        }
    }
}

/// Adds a recipe's ingredients to `items`. Items not yet stored carry id 0.
pub fn add_ingredients(
    mut items: Vec<GroceryItem>,
    ingredients: &[Ingredient],
    recipe_id: Id,
) -> Vec<GroceryItem> {
    for ingredient in ingredients {
        let merge = merge_item(&items, NewGroceryItem::from_ingredient(ingredient, recipe_id));
        apply_merge(&mut items, merge, 0);
    }

    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

pub fn progress(items: &[GroceryItem]) -> Progress {
    let total = items.len();
    let completed = items.iter().filter(|item| item.checked).count();
    let percent = if total == 0 {
        0
    } else {
        (completed as f64 * 100.0 / total as f64).round() as u32
    };

    Progress {
        completed,
        total,
        percent,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryGroup {
    pub letter: String,
    pub items: Vec<GroceryItem>,
}

/// Groups by upper-cased first letter of the ingredient, letters sorted.
pub fn group_by_letter(items: &[GroceryItem]) -> Vec<GroceryGroup> {
    let mut groups: BTreeMap<String, Vec<GroceryItem>> = BTreeMap::new();
    for item in items {
        let letter = item
            .ingredient
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default();

        groups.entry(letter).or_default().push(item.clone());
    }

    groups
        .into_iter()
        .map(|(letter, items)| GroceryGroup { letter, items })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: f64, unit: &str) -> Ingredient {
        Ingredient {
            name: name.to_owned(),
            amount,
            unit: unit.to_owned(),
            notes: String::new(),
        }
    }

    fn item(id: Id, name: &str, quantity: f64, unit: &str, recipe_ids: Vec<Id>) -> GroceryItem {
        GroceryItem {
            id,
            ingredient: name.to_owned(),
            quantity,
            unit: unit.to_owned(),
            recipe_ids,
            checked: false,
        }
    }

    #[test]
    fn same_product_is_summed() {
        let items = vec![item(1, "flour", 2.0, "cup", vec![1])];
        let items = add_ingredients(items, &[ingredient("Flour", 1.0, "cup")], 1);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3.0);
        assert_eq!(items[0].recipe_ids, vec![1]);
        assert_eq!(items[0].ingredient, "flour");
    }

    #[test]
    fn two_recipes_share_one_item() {
        let items = add_ingredients(vec![], &[ingredient("Sugar", 1.0, "cup")], 1);
        let items = add_ingredients(items, &[ingredient("sugar", 0.5, "cup")], 2);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1.5);
        assert_eq!(items[0].recipe_ids, vec![1, 2]);
    }

    #[test]
    fn different_units_stay_apart() {
        let items = add_ingredients(
            vec![],
            &[ingredient("Butter", 1.0, "cup"), ingredient("Butter", 2.0, "tbsp")],
            1,
        );

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.checked));
    }

    #[test]
    fn readding_a_recipe_counts_twice() {
        let eggs = [ingredient("Eggs", 2.0, "pcs")];
        let items = add_ingredients(vec![], &eggs, 5);
        let items = add_ingredients(items, &eggs, 5);

        assert_eq!(items[0].quantity, 4.0);
        assert_eq!(items[0].recipe_ids, vec![5]);
    }

    #[test]
    fn progress_rounds_percent() {
        let mut items = vec![
            item(1, "a", 1.0, "", vec![]),
            item(2, "b", 1.0, "", vec![]),
            item(3, "c", 1.0, "", vec![]),
        ];
        assert_eq!(progress(&items).percent, 0);

        items[0].checked = true;
        let p = progress(&items);
        assert_eq!((p.completed, p.total, p.percent), (1, 3, 33));

        items[1].checked = true;
        assert_eq!(progress(&items).percent, 67);
        assert_eq!(progress(&[]).percent, 0);
    }

    #[test]
    fn groups_sorted_by_letter() {
        let items = vec![
            item(1, "tomato", 1.0, "", vec![]),
            item(2, "Basil", 1.0, "", vec![]),
            item(3, "butter", 1.0, "", vec![]),
        ];
        let groups = group_by_letter(&items);

        let letters: Vec<_> = groups.iter().map(|g| g.letter.as_str()).collect();
        assert_eq!(letters, vec!["B", "T"]);
        assert_eq!(groups[0].items.len(), 2);
    }
}
