//! Helpers for the storage encoding of list and flag columns.
//!
//! Multi-valued columns are stored as comma-joined strings and the
//! `checked` flag of grocery items as the text `"true"`/`"false"`.

use std::str::FromStr;

use crate::Id;

pub fn join_list<T: AsRef<str>>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn split_list(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return vec![];
    }

    value.split(',').collect()
}

/// Splits and parses a comma-joined column. Unknown values are skipped.
pub fn parse_list<T: FromStr>(value: &str) -> Vec<T> {
    split_list(value)
        .into_iter()
        .filter_map(|raw| match T::from_str(raw.trim()) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(value = raw, "skipping unknown list value");
                None
            }
        })
        .collect()
}

pub fn join_ids(ids: &[Id]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn parse_ids(value: &str) -> Vec<Id> {
    split_list(value)
        .into_iter()
        .filter_map(|raw| raw.trim().parse().ok())
        .collect()
}

pub fn format_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

pub fn parse_flag(value: &str) -> bool {
    value.contains("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{DietaryRestriction, MealType};

    #[test]
    fn empty_column_is_empty_list() {
        assert!(split_list("").is_empty());
        assert!(parse_list::<MealType>("").is_empty());
        assert!(parse_ids("").is_empty());
    }

    #[test]
    fn list_columns_keep_backend_encoding() {
        let restrictions = [DietaryRestriction::Vegan, DietaryRestriction::GlutenFree];
        let joined = join_list(&restrictions);
        assert_eq!(joined, "Vegan,Gluten-Free");
        assert_eq!(parse_list::<DietaryRestriction>(&joined), restrictions);
    }

    #[test]
    fn unknown_values_are_dropped() {
        assert_eq!(
            parse_list::<MealType>("Lunch,Brunch, Dinner"),
            vec![MealType::Lunch, MealType::Dinner]
        );
        assert_eq!(parse_ids("3, 7,x,12"), vec![3, 7, 12]);
    }

    #[test]
    fn flag_reads_any_text_containing_true() {
        assert!(parse_flag(format_flag(true)));
        assert!(!parse_flag(format_flag(false)));
        assert!(parse_flag("true,"));
        assert!(!parse_flag(""));
    }
}
