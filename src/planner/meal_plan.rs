use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Week order used for traversal and display.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::InvalidDay(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MealSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::InvalidSlot(s.to_string()))
    }
}

/// Seven days by three slots. A cell holds a meal name, which may be a saved
/// recipe or free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPlan {
    cells: [[Option<String>; 3]; 7],
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: Day, slot: MealSlot) -> Option<&str> {
        self.cells[day.index()][slot.index()].as_deref()
    }

    /// Assigns a meal to a cell. Surrounding whitespace is trimmed and a blank
    /// name clears the cell.
    pub fn set(&mut self, day: Day, slot: MealSlot, meal: impl AsRef<str>) {
        let meal = meal.as_ref().trim();
        self.cells[day.index()][slot.index()] = if meal.is_empty() {
            None
        } else {
            Some(meal.to_string())
        };
    }

    pub fn clear_cell(&mut self, day: Day, slot: MealSlot) -> Option<String> {
        self.cells[day.index()][slot.index()].take()
    }

    pub fn clear_all(&mut self) {
        self.cells = Default::default();
    }

    /// Every cell in day-then-slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, MealSlot, Option<&str>)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            MealSlot::ALL
                .into_iter()
                .map(move |slot| (day, slot, self.get(day, slot)))
        })
    }

    pub fn planned_meals(&self) -> impl Iterator<Item = (Day, MealSlot, &str)> + '_ {
        self.iter()
            .filter_map(|(day, slot, meal)| meal.map(|m| (day, slot, m)))
    }

    pub fn planned_count(&self) -> usize {
        self.planned_meals().count()
    }

    pub fn is_empty(&self) -> bool {
        self.planned_count() == 0
    }
}

// On disk the plan is a nested object: {"Monday": {"Breakfast": null, ...}, ...}
impl Serialize for MealPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct DayCells<'a>(&'a [Option<String>; 3]);

        impl Serialize for DayCells<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(3))?;
                for slot in MealSlot::ALL {
                    map.serialize_entry(slot.as_str(), &self.0[slot.index()])?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(7))?;
        for day in Day::ALL {
            map.serialize_entry(day.as_str(), &DayCells(&self.cells[day.index()]))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MealPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlanVisitor;

        impl<'de> Visitor<'de> for PlanVisitor {
            type Value = MealPlan;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of day names to meal slots")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MealPlan, A::Error> {
                let mut plan = MealPlan::new();
                while let Some((day, slots)) = access.next_entry::<String, JsonValue>()? {
                    // Unknown days, non-map days and unknown slots are skipped so
                    // one bad entry never discards the rest of the data file.
                    let Ok(day) = day.parse::<Day>() else { continue };
                    let JsonValue::Object(slots) = slots else { continue };
                    for (slot, meal) in slots {
                        let Ok(slot) = slot.parse::<MealSlot>() else { continue };
                        // Stored text is kept exactly; only `set` trims user input.
                        if let JsonValue::String(meal) = meal {
                            if !meal.is_empty() {
                                plan.cells[day.index()][slot.index()] = Some(meal);
                            }
                        }
                    }
                }
                Ok(plan)
            }
        }

        deserializer.deserialize_map(PlanVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_day_and_slot_case_insensitive() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!(" SUNDAY ".parse::<Day>().unwrap(), Day::Sunday);
        assert_eq!("dinner".parse::<MealSlot>().unwrap(), MealSlot::Dinner);
        assert!(matches!("Funday".parse::<Day>(), Err(PlannerError::InvalidDay(_))));
        assert!(matches!("Brunch".parse::<MealSlot>(), Err(PlannerError::InvalidSlot(_))));
    }

    #[test]
    fn test_set_trims_and_blank_clears() {
        let mut plan = MealPlan::new();
        plan.set(Day::Monday, MealSlot::Dinner, "  Tacos ");
        assert_eq!(plan.get(Day::Monday, MealSlot::Dinner), Some("Tacos"));

        plan.set(Day::Monday, MealSlot::Dinner, "   ");
        assert_eq!(plan.get(Day::Monday, MealSlot::Dinner), None);
    }

    #[test]
    fn test_iter_order_is_day_then_slot() {
        let plan = MealPlan::new();
        let cells: Vec<(Day, MealSlot)> = plan.iter().map(|(d, s, _)| (d, s)).collect();
        assert_eq!(cells.len(), 21);
        assert_eq!(cells[0], (Day::Monday, MealSlot::Breakfast));
        assert_eq!(cells[2], (Day::Monday, MealSlot::Dinner));
        assert_eq!(cells[3], (Day::Tuesday, MealSlot::Breakfast));
        assert_eq!(cells[20], (Day::Sunday, MealSlot::Dinner));
    }

    #[test]
    fn test_planned_meals_and_clear() {
        let mut plan = MealPlan::new();
        plan.set(Day::Friday, MealSlot::Lunch, "Soup");
        plan.set(Day::Monday, MealSlot::Breakfast, "Oatmeal");

        let planned: Vec<_> = plan.planned_meals().collect();
        assert_eq!(
            planned,
            vec![
                (Day::Monday, MealSlot::Breakfast, "Oatmeal"),
                (Day::Friday, MealSlot::Lunch, "Soup"),
            ]
        );
        assert_eq!(plan.clear_cell(Day::Friday, MealSlot::Lunch), Some("Soup".to_string()));
        assert_eq!(plan.planned_count(), 1);

        plan.clear_all();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut plan = MealPlan::new();
        plan.set(Day::Monday, MealSlot::Dinner, "Tacos");

        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            value["Monday"],
            json!({"Breakfast": null, "Lunch": null, "Dinner": "Tacos"})
        );
        assert_eq!(value["Sunday"]["Breakfast"], json!(null));

        let text = serde_json::to_string(&plan).unwrap();
        assert!(text.starts_with(r#"{"Monday":{"Breakfast":null"#));
    }

    #[test]
    fn test_deserialize_tolerates_partial_and_unknown_entries() {
        let plan: MealPlan = serde_json::from_value(json!({
            "Tuesday": {"Lunch": "Salad", "Brunch": "Waffles"},
            "Someday": {"Dinner": "Pizza"}
        }))
        .unwrap();

        assert_eq!(plan.get(Day::Tuesday, MealSlot::Lunch), Some("Salad"));
        assert_eq!(plan.planned_count(), 1);
    }

    #[test]
    fn test_deserialize_keeps_stored_text_exactly() {
        let plan: MealPlan = serde_json::from_value(json!({
            "Monday": {"Breakfast": "", "Lunch": "  Soup", "Dinner": "Tacos "}
        }))
        .unwrap();

        assert_eq!(plan.get(Day::Monday, MealSlot::Breakfast), None);
        assert_eq!(plan.get(Day::Monday, MealSlot::Lunch), Some("  Soup"));
        assert_eq!(plan.get(Day::Monday, MealSlot::Dinner), Some("Tacos "));

        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["Monday"]["Dinner"], json!("Tacos "));
    }

    #[test]
    fn test_deserialize_skips_days_that_are_not_maps() {
        let plan: MealPlan = serde_json::from_value(json!({
            "Monday": null,
            "Tuesday": ["Salad"],
            "Wednesday": {"Dinner": "Chili", "Lunch": 42}
        }))
        .unwrap();

        assert_eq!(plan.get(Day::Wednesday, MealSlot::Dinner), Some("Chili"));
        assert_eq!(plan.planned_count(), 1);
    }
}
