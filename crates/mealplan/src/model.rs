use std::str::FromStr;

use recipebox_shared::{Id, mealplan::TimeSlot};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use time::{Date, OffsetDateTime};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEntry {
    #[serde(rename = "Id")]
    pub id: Id,
    pub recipe_id: Id,
    #[serde(with = "recipebox_shared::iso_date")]
    pub date: Date,
    pub time_slot: TimeSlot,
    pub notes: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// `meal_plan` table row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MealPlanRow {
    #[serde(rename = "Id", default)]
    pub id: Id,
    #[serde(rename = "Name", default)]
    pub name: String,
    pub recipe_id: Id,
    pub date: String,
    pub time_slot: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: String,
}

impl TryFrom<MealPlanRow> for MealPlanEntry {
    type Error = recipebox_shared::Error;

    fn try_from(row: MealPlanRow) -> Result<Self, Self::Error> {
        let Ok(time_slot) = TimeSlot::from_str(row.time_slot.trim()) else {
            recipebox_shared::user!("unknown time slot '{}'", row.time_slot);
        };

        Ok(Self {
            id: row.id,
            recipe_id: row.recipe_id,
            date: recipebox_shared::parse_date(&row.date)?,
            time_slot,
            notes: row.notes,
            created_at: recipebox_shared::timestamp_or_now(&row.created_at),
        })
    }
}

/// Maps rows, skipping and logging the ones that do not decode.
pub(crate) fn decode_rows(rows: Vec<MealPlanRow>) -> Vec<MealPlanEntry> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match MealPlanEntry::try_from(row) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(id, err = %err, "some meal plan records failed to load");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPlan {
    pub recipe_id: Id,
    #[serde(with = "recipebox_shared::iso_date")]
    pub date: Date,
    pub time_slot: TimeSlot,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: String,
}

impl NewMealPlan {
    pub(crate) fn into_row(self, created_at: String) -> MealPlanRow {
        MealPlanRow {
            id: 0,
            name: format!("Meal Plan {created_at}"),
            recipe_id: self.recipe_id,
            date: recipebox_shared::format_date(self.date),
            time_slot: self.time_slot.to_string(),
            notes: self.notes,
            created_at,
        }
    }
}

/// Moves an entry to another cell or edits its notes.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanPatch {
    #[serde(default, deserialize_with = "optional_date::deserialize")]
    pub date: Option<Date>,
    pub time_slot: Option<TimeSlot>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl MealPlanPatch {
    pub(crate) fn apply(self, row: &mut MealPlanRow) {
        if let Some(date) = self.date {
            row.date = recipebox_shared::format_date(date);
        }
        if let Some(time_slot) = self.time_slot {
            row.time_slot = time_slot.to_string();
        }
        if let Some(notes) = self.notes {
            row.notes = notes;
        }
    }
}

mod optional_date {
    use serde::{Deserialize, Deserializer, de::Error};
    use time::Date;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let Some(value) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        recipebox_shared::parse_date(&value)
            .map(Some)
            .map_err(D::Error::custom)
    }
}
