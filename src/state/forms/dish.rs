//! Dish draft, validation rules and the request payload

use super::field::Field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const SLICE_COUNT_MESSAGE: &str = "Please enter the number of pizza slices";
pub const DIAMETER_MESSAGE: &str = "Please enter the pizza diameter";
pub const SPICINESS_MESSAGE: &str = "Please enter the spiciness level";
pub const BREAD_SLICES_MESSAGE: &str = "Please enter the number of slices of bread";

pub const SPICINESS_MIN: u8 = 1;
pub const SPICINESS_MAX: u8 = 10;

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d\d:[0-5]\d:[0-5]\d$").expect("clock time pattern is valid")
});

/// Discriminant selecting which variant fields are required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DishType {
    Pizza,
    Soup,
    Sandwich,
}

impl DishType {
    pub const ALL: [DishType; 3] = [DishType::Pizza, DishType::Soup, DishType::Sandwich];

    pub fn label(self) -> &'static str {
        match self {
            DishType::Pizza => "Pizza",
            DishType::Soup => "Soup",
            DishType::Sandwich => "Sandwich",
        }
    }

    /// Fields that only exist for this dish type
    pub fn variant_fields(self) -> &'static [Field] {
        match self {
            DishType::Pizza => &[Field::SliceCount, Field::Diameter],
            DishType::Soup => &[Field::Spiciness],
            DishType::Sandwich => &[Field::BreadSlices],
        }
    }

    /// Next option in selection order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous option in selection order, wrapping around
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// In-progress dish record, as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishDraft {
    pub name: String,
    pub preparation_time: String,
    pub dish_type: Option<DishType>,
    pub slice_count: String,
    pub diameter: String,
    pub spiciness: Option<u8>,
    pub bread_slices: String,
}

impl DishDraft {
    /// Raw text of a text-edited field
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::PreparationTime => Some(&self.preparation_time),
            Field::SliceCount => Some(&self.slice_count),
            Field::Diameter => Some(&self.diameter),
            Field::BreadSlices => Some(&self.bread_slices),
            Field::DishType | Field::Spiciness => None,
        }
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::PreparationTime => Some(&mut self.preparation_time),
            Field::SliceCount => Some(&mut self.slice_count),
            Field::Diameter => Some(&mut self.diameter),
            Field::BreadSlices => Some(&mut self.bread_slices),
            Field::DishType | Field::Spiciness => None,
        }
    }

    /// Fields required for the current dish type, in display order
    pub fn active_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Name, Field::PreparationTime, Field::DishType];
        if let Some(dish_type) = self.dish_type {
            fields.extend_from_slice(dish_type.variant_fields());
        }
        fields
    }
}

/// Variant-specific attributes of a validated dish
#[derive(Debug, Clone, PartialEq)]
pub enum DishKind {
    Pizza { no_of_slices: u32, diameter: f64 },
    Soup { spiciness_scale: u8 },
    Sandwich { slices_of_bread: u32 },
}

impl DishKind {
    pub fn dish_type(&self) -> DishType {
        match self {
            DishKind::Pizza { .. } => DishType::Pizza,
            DishKind::Soup { .. } => DishType::Soup,
            DishKind::Sandwich { .. } => DishType::Sandwich,
        }
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDish {
    pub name: String,
    pub preparation_time: String,
    pub kind: DishKind,
}

/// Field name to message; empty means the draft is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// Whether `value` is a complete `HH:MM:SS` clock time
pub fn is_clock_time(value: &str) -> bool {
    CLOCK_TIME.is_match(value)
}

/// Validate the whole draft. Only the active variant's fields are checked.
pub fn validate(draft: &DishDraft) -> Result<ValidDish, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.name.is_empty() {
        errors.insert(Field::Name, REQUIRED_MESSAGE);
    }
    if !is_clock_time(&draft.preparation_time) {
        errors.insert(Field::PreparationTime, REQUIRED_MESSAGE);
    }

    let kind = match draft.dish_type {
        None => {
            errors.insert(Field::DishType, REQUIRED_MESSAGE);
            None
        }
        Some(DishType::Pizza) => {
            let slices = parse_count(
                &draft.slice_count,
                Field::SliceCount,
                SLICE_COUNT_MESSAGE,
                &mut errors,
            );
            let diameter = parse_diameter(&draft.diameter, &mut errors);
            slices
                .zip(diameter)
                .map(|(no_of_slices, diameter)| DishKind::Pizza {
                    no_of_slices,
                    diameter,
                })
        }
        Some(DishType::Soup) => match draft.spiciness {
            None => {
                errors.insert(Field::Spiciness, REQUIRED_MESSAGE);
                None
            }
            Some(level) if (SPICINESS_MIN..=SPICINESS_MAX).contains(&level) => {
                Some(DishKind::Soup {
                    spiciness_scale: level,
                })
            }
            Some(_) => {
                errors.insert(Field::Spiciness, SPICINESS_MESSAGE);
                None
            }
        },
        Some(DishType::Sandwich) => parse_count(
            &draft.bread_slices,
            Field::BreadSlices,
            BREAD_SLICES_MESSAGE,
            &mut errors,
        )
        .map(|slices_of_bread| DishKind::Sandwich { slices_of_bread }),
    };

    match kind {
        Some(kind) if errors.is_empty() => Ok(ValidDish {
            name: draft.name.clone(),
            preparation_time: draft.preparation_time.clone(),
            kind,
        }),
        _ => Err(errors),
    }
}

fn parse_count(
    raw: &str,
    field: Field,
    message: &'static str,
    errors: &mut ValidationErrors,
) -> Option<u32> {
    if raw.is_empty() {
        errors.insert(field, REQUIRED_MESSAGE);
        return None;
    }
    match raw.parse::<u32>() {
        Ok(count) if count >= 1 => Some(count),
        _ => {
            errors.insert(field, message);
            None
        }
    }
}

fn parse_diameter(raw: &str, errors: &mut ValidationErrors) -> Option<f64> {
    if raw.is_empty() {
        errors.insert(Field::Diameter, REQUIRED_MESSAGE);
        return None;
    }
    match raw.parse::<f64>() {
        Ok(diameter) if diameter.is_finite() && diameter >= 0.0 => Some(diameter),
        _ => {
            errors.insert(Field::Diameter, DIAMETER_MESSAGE);
            None
        }
    }
}

/// Request payload for the dish creation endpoint.
///
/// Fields of inactive variants are serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDish {
    pub name: String,
    pub preparation_time: String,
    #[serde(rename = "type")]
    pub dish_type: DishType,
    pub no_of_slices: Option<u32>,
    pub diameter: Option<f64>,
    pub spiciness_scale: Option<u8>,
    pub slices_of_bread: Option<u32>,
}

impl From<&ValidDish> for NewDish {
    fn from(dish: &ValidDish) -> Self {
        let mut payload = NewDish {
            name: dish.name.clone(),
            preparation_time: dish.preparation_time.clone(),
            dish_type: dish.kind.dish_type(),
            no_of_slices: None,
            diameter: None,
            spiciness_scale: None,
            slices_of_bread: None,
        };
        match dish.kind {
            DishKind::Pizza {
                no_of_slices,
                diameter,
            } => {
                payload.no_of_slices = Some(no_of_slices);
                payload.diameter = Some(diameter);
            }
            DishKind::Soup { spiciness_scale } => payload.spiciness_scale = Some(spiciness_scale),
            DishKind::Sandwich { slices_of_bread } => {
                payload.slices_of_bread = Some(slices_of_bread)
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_draft(dish_type: Option<DishType>) -> DishDraft {
        DishDraft {
            name: "Margherita".to_string(),
            preparation_time: "00:20:00".to_string(),
            dish_type,
            ..Default::default()
        }
    }

    fn pizza(slices: &str, diameter: &str) -> DishDraft {
        DishDraft {
            slice_count: slices.to_string(),
            diameter: diameter.to_string(),
            ..base_draft(Some(DishType::Pizza))
        }
    }

    mod clock_time {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_valid_times() {
            assert!(is_clock_time("00:20:00"));
            assert!(is_clock_time("99:59:59"));
        }

        #[test]
        fn test_rejects_out_of_range_and_partial() {
            assert!(!is_clock_time("00:60:00"));
            assert!(!is_clock_time("00:00:60"));
            assert!(!is_clock_time("00:20"));
            assert!(!is_clock_time("0:20:00"));
            assert!(!is_clock_time("00:20:00 "));
            assert!(!is_clock_time(""));
        }

        #[test]
        fn test_invalid_time_reports_required() {
            let draft = DishDraft {
                preparation_time: "00:2".to_string(),
                ..pizza("8", "30")
            };
            let errors = validate(&draft).unwrap_err();
            assert_eq!(errors.get(Field::PreparationTime), Some(REQUIRED_MESSAGE));
            assert_eq!(errors.len(), 1);
        }
    }

    mod common_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_draft_requires_common_fields() {
            let errors = validate(&DishDraft::default()).unwrap_err();
            assert_eq!(errors.get(Field::Name), Some(REQUIRED_MESSAGE));
            assert_eq!(errors.get(Field::PreparationTime), Some(REQUIRED_MESSAGE));
            assert_eq!(errors.get(Field::DishType), Some(REQUIRED_MESSAGE));
            assert_eq!(errors.len(), 3);
        }

        #[test]
        fn test_missing_dish_type_is_the_only_error() {
            let errors = validate(&base_draft(None)).unwrap_err();
            let collected: Vec<_> = errors.iter().collect();
            assert_eq!(collected, vec![(Field::DishType, REQUIRED_MESSAGE)]);
        }
    }

    mod pizza_rules {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_pizza() {
            let dish = validate(&pizza("8", "30")).unwrap();
            assert_eq!(
                dish.kind,
                DishKind::Pizza {
                    no_of_slices: 8,
                    diameter: 30.0
                }
            );
        }

        #[test]
        fn test_zero_diameter_is_allowed() {
            assert!(validate(&pizza("1", "0")).is_ok());
        }

        #[test]
        fn test_zero_slices_rejected() {
            let errors = validate(&pizza("0", "30")).unwrap_err();
            assert_eq!(errors.get(Field::SliceCount), Some(SLICE_COUNT_MESSAGE));
        }

        #[test]
        fn test_missing_variant_fields_required() {
            let errors = validate(&pizza("", "")).unwrap_err();
            assert_eq!(errors.get(Field::SliceCount), Some(REQUIRED_MESSAGE));
            assert_eq!(errors.get(Field::Diameter), Some(REQUIRED_MESSAGE));
        }

        #[test]
        fn test_unparsable_diameter_rejected() {
            assert!(validate(&pizza("8", "0.")).is_ok());
            let errors = validate(&pizza("8", ".")).unwrap_err();
            assert_eq!(errors.get(Field::Diameter), Some(DIAMETER_MESSAGE));
        }

        #[test]
        fn test_other_variant_fields_ignored() {
            let draft = DishDraft {
                spiciness: Some(42),
                bread_slices: "0".to_string(),
                ..pizza("8", "30")
            };
            assert!(validate(&draft).is_ok());
        }
    }

    mod soup_rules {
        use super::*;
        use pretty_assertions::assert_eq;

        fn soup(level: Option<u8>) -> DishDraft {
            DishDraft {
                spiciness: level,
                ..base_draft(Some(DishType::Soup))
            }
        }

        #[test]
        fn test_range_bounds() {
            assert!(validate(&soup(Some(1))).is_ok());
            assert!(validate(&soup(Some(10))).is_ok());
            let errors = validate(&soup(Some(11))).unwrap_err();
            assert_eq!(errors.get(Field::Spiciness), Some(SPICINESS_MESSAGE));
            let errors = validate(&soup(Some(0))).unwrap_err();
            assert_eq!(errors.get(Field::Spiciness), Some(SPICINESS_MESSAGE));
        }

        #[test]
        fn test_missing_spiciness_required() {
            let errors = validate(&soup(None)).unwrap_err();
            assert_eq!(errors.get(Field::Spiciness), Some(REQUIRED_MESSAGE));
        }

        #[test]
        fn test_pizza_fields_not_required() {
            let errors = validate(&soup(None)).unwrap_err();
            assert!(errors.get(Field::SliceCount).is_none());
            assert!(errors.get(Field::Diameter).is_none());
        }
    }

    mod sandwich_rules {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_bread_slices_rules() {
            let mut draft = base_draft(Some(DishType::Sandwich));
            let errors = validate(&draft).unwrap_err();
            assert_eq!(errors.get(Field::BreadSlices), Some(REQUIRED_MESSAGE));

            draft.bread_slices = "0".to_string();
            let errors = validate(&draft).unwrap_err();
            assert_eq!(errors.get(Field::BreadSlices), Some(BREAD_SLICES_MESSAGE));

            draft.bread_slices = "2".to_string();
            assert!(validate(&draft).is_ok());
        }
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_soup_payload_nulls_other_variants() {
            let draft = DishDraft {
                name: "Tomato".to_string(),
                spiciness: Some(7),
                ..base_draft(Some(DishType::Soup))
            };
            let payload = NewDish::from(&validate(&draft).unwrap());
            assert_eq!(
                serde_json::to_value(&payload).unwrap(),
                json!({
                    "name": "Tomato",
                    "preparation_time": "00:20:00",
                    "type": "soup",
                    "no_of_slices": null,
                    "diameter": null,
                    "spiciness_scale": 7,
                    "slices_of_bread": null,
                })
            );
        }

        #[test]
        fn test_pizza_payload() {
            let payload = NewDish::from(&validate(&pizza("8", "30")).unwrap());
            assert_eq!(
                serde_json::to_value(&payload).unwrap(),
                json!({
                    "name": "Margherita",
                    "preparation_time": "00:20:00",
                    "type": "pizza",
                    "no_of_slices": 8,
                    "diameter": 30.0,
                    "spiciness_scale": null,
                    "slices_of_bread": null,
                })
            );
        }

        #[test]
        fn test_stale_values_of_previous_variant_not_sent() {
            let draft = DishDraft {
                slice_count: "8".to_string(),
                diameter: "30".to_string(),
                bread_slices: "2".to_string(),
                ..base_draft(Some(DishType::Sandwich))
            };
            let payload = NewDish::from(&validate(&draft).unwrap());
            assert_eq!(payload.no_of_slices, None);
            assert_eq!(payload.diameter, None);
            assert_eq!(payload.slices_of_bread, Some(2));
        }

        #[test]
        fn test_payload_keys_match_field_wire_names() {
            let payload = NewDish::from(&validate(&pizza("8", "30")).unwrap());
            let value = serde_json::to_value(&payload).unwrap();
            let object = value.as_object().unwrap();
            for field in [
                Field::Name,
                Field::PreparationTime,
                Field::DishType,
                Field::SliceCount,
                Field::Diameter,
                Field::Spiciness,
                Field::BreadSlices,
            ] {
                assert!(object.contains_key(field.wire_name()), "{field:?}");
            }
            assert_eq!(object.len(), 7);
        }
    }

    #[test]
    fn test_dish_type_cycles() {
        assert_eq!(DishType::Pizza.next(), DishType::Soup);
        assert_eq!(DishType::Sandwich.next(), DishType::Pizza);
        assert_eq!(DishType::Pizza.prev(), DishType::Sandwich);
        for dish_type in DishType::ALL {
            assert_eq!(dish_type.next().prev(), dish_type);
        }
    }

    #[test]
    fn test_active_fields_follow_dish_type() {
        let mut draft = DishDraft::default();
        assert_eq!(draft.active_fields().len(), 3);
        draft.dish_type = Some(DishType::Pizza);
        assert_eq!(
            draft.active_fields(),
            vec![
                Field::Name,
                Field::PreparationTime,
                Field::DishType,
                Field::SliceCount,
                Field::Diameter
            ]
        );
        draft.dish_type = Some(DishType::Soup);
        assert_eq!(draft.active_fields().last(), Some(&Field::Spiciness));
    }
}
