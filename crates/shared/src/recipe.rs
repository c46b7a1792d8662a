use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    #[strum(to_string = "Gluten-Free")]
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    #[strum(to_string = "Dairy-Free")]
    #[serde(rename = "Dairy-Free")]
    DairyFree,
    Keto,
    #[strum(to_string = "Low-Carb")]
    #[serde(rename = "Low-Carb")]
    LowCarb,
    #[strum(to_string = "High-Protein")]
    #[serde(rename = "High-Protein")]
    HighProtein,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub step_number: u32,
    pub text: String,
    /// Minutes, when the step has a timer.
    #[serde(default, alias = "durationMinutes")]
    pub duration: Option<u32>,
}
