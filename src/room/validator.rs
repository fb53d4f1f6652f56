//! Raw JSON to `RoomDescription`.
//!
//! Every field is checked independently and all violations are collected, so
//! a caller sees the full list of problems in one round trip.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::room::description::{DoorSwing, OutputSize, RoomDescription};

pub const WALL_FINISH: &str = "wallFinish";
pub const DOOR_OFFSET_MM: &str = "doorOffsetMm";
pub const DOOR_SWING: &str = "doorSwing";
pub const CEILING_HEIGHT_MM: &str = "ceilingHeightMm";
pub const ROOM_WIDTH_MM: &str = "roomWidthMm";
pub const ROOM_DEPTH_MM: &str = "roomDepthMm";
pub const STYLE: &str = "style";
pub const OUTPUT_SIZE: &str = "outputSize";

pub const CEILING_HEIGHT_RANGE_MM: (u32, u32) = (2000, 4000);
pub const ROOM_SIDE_RANGE_MM: (u32, u32) = (1000, 20000);

/// Largest door offset accepted; integers above this lose precision as JSON numbers.
pub const MAX_DOOR_OFFSET_MM: u64 = (1 << 53) - 1;

/// Half the width of the reference door leaf used in the prompt.
pub const DOOR_HALF_WIDTH_MM: u32 = 415;

/// Optional checks layered on top of the per-field schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Require `doorOffsetMm + DOOR_HALF_WIDTH_MM <= roomWidthMm`.
    pub check_door_within_wall: bool,
}

/// All problems found in one input, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        for (field, messages) in &self.field_errors {
            parts.push(format!("{}: {}", field, messages.join(", ")));
        }
        write!(f, "invalid room description ({})", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Whether `field` has at least one recorded problem.
    pub fn has_field(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors.entry(field.to_string()).or_default().push(message.into());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RoomValidator {
    policy: ValidationPolicy,
}

impl RoomValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        RoomValidator { policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Validate an untyped request body into a `RoomDescription`.
    pub fn validate(&self, raw: &Value) -> Result<RoomDescription, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let Some(obj) = raw.as_object() else {
            errors.form_errors.push(format!("Expected object, received {}", type_name(raw)));
            return Err(errors);
        };

        let wall_finish = text(obj, WALL_FINISH, &mut errors);
        let door_offset_mm = integer(obj, DOOR_OFFSET_MM, 0, MAX_DOOR_OFFSET_MM, &mut errors);
        let door_swing = variant::<DoorSwing>(obj, DOOR_SWING, &DoorSwing::ALL.map(|v| v.as_str()), &mut errors);
        let (ceiling_min, ceiling_max) = CEILING_HEIGHT_RANGE_MM;
        let ceiling_height_mm = dimension(obj, CEILING_HEIGHT_MM, ceiling_min, ceiling_max, &mut errors);
        let (side_min, side_max) = ROOM_SIDE_RANGE_MM;
        let room_width_mm = dimension(obj, ROOM_WIDTH_MM, side_min, side_max, &mut errors);
        let room_depth_mm = dimension(obj, ROOM_DEPTH_MM, side_min, side_max, &mut errors);
        let style = text(obj, STYLE, &mut errors);
        let output_size = variant::<OutputSize>(obj, OUTPUT_SIZE, &OutputSize::ALL.map(|v| v.as_str()), &mut errors);

        if self.policy.check_door_within_wall {
            if let (Some(offset), Some(width)) = (door_offset_mm, room_width_mm) {
                if offset + u64::from(DOOR_HALF_WIDTH_MM) > u64::from(width) {
                    errors.push(
                        DOOR_OFFSET_MM,
                        format!(
                            "Door centerline at {} mm leaves the door outside a {} mm wide room",
                            offset, width
                        ),
                    );
                }
            }
        }

        match (
            wall_finish,
            door_offset_mm,
            door_swing,
            ceiling_height_mm,
            room_width_mm,
            room_depth_mm,
            style,
            output_size,
        ) {
            (Some(wf), Some(off), Some(swing), Some(ceil), Some(w), Some(d), Some(st), Some(size))
                if errors.is_empty() =>
            {
                Ok(RoomDescription::new(wf, off, swing, ceil, w, d, st, size))
            }
            _ => Err(errors),
        }
    }
}

/// Validate with the default (per-field only) policy.
pub fn validate(raw: &Value) -> Result<RoomDescription, ValidationErrors> {
    RoomValidator::default().validate(raw)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn present<'a>(obj: &'a Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, "Required");
            None
        }
        Some(v) => Some(v),
    }
}

fn text(obj: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match present(obj, field, errors)? {
        Value::String(s) if s.is_empty() => {
            errors.push(field, "String must contain at least 1 character(s)");
            None
        }
        Value::String(s) => Some(s.clone()),
        other => {
            errors.push(field, format!("Expected string, received {}", type_name(other)));
            None
        }
    }
}

fn dimension(obj: &Map<String, Value>, field: &str, min: u32, max: u32, errors: &mut ValidationErrors) -> Option<u32> {
    integer(obj, field, u64::from(min), u64::from(max), errors).and_then(|v| u32::try_from(v).ok())
}

fn integer(obj: &Map<String, Value>, field: &str, min: u64, max: u64, errors: &mut ValidationErrors) -> Option<u64> {
    let value = present(obj, field, errors)?;
    let Value::Number(n) = value else {
        errors.push(field, format!("Expected number, received {}", type_name(value)));
        return None;
    };

    // i128 covers the whole u64 and i64 range, so comparisons below are exact.
    let parsed: Option<i128> = if let Some(i) = n.as_i64() {
        Some(i128::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(i128::from(u))
    } else {
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 1e18)
            .map(|f| f as i128)
    };
    let Some(parsed) = parsed else {
        errors.push(field, "Expected integer, received float");
        return None;
    };

    if parsed < i128::from(min) {
        errors.push(field, format!("Number must be greater than or equal to {}", min));
        None
    } else if parsed > i128::from(max) {
        errors.push(field, format!("Number must be less than or equal to {}", max));
        None
    } else {
        u64::try_from(parsed).ok()
    }
}

fn variant<T: FromStr>(
    obj: &Map<String, Value>,
    field: &str,
    allowed: &[&str],
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = present(obj, field, errors)?;
    let expected = allowed.iter().map(|a| format!("'{}'", a)).collect::<Vec<_>>().join(" | ");
    match value {
        Value::String(s) => match s.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(field, format!("Invalid enum value. Expected {}, received '{}'", expected, s));
                None
            }
        },
        other => {
            errors.push(field, format!("Expected {}, received {}", expected, type_name(other)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_a() -> Value {
        json!({
            "wallFinish": "Blue walls",
            "doorOffsetMm": 100,
            "doorSwing": "inward-right",
            "ceilingHeightMm": 2500,
            "roomWidthMm": 3000,
            "roomDepthMm": 3000,
            "style": "modern",
            "outputSize": "1536x1024"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut raw = scenario_a();
        raw[field] = value;
        raw
    }

    fn rejected_fields(raw: &Value) -> Vec<String> {
        validate(raw).unwrap_err().field_errors.into_keys().collect()
    }

    #[test]
    fn accepts_scenario_a_with_equal_fields() {
        let room = validate(&scenario_a()).unwrap();
        assert_eq!(room.wall_finish(), "Blue walls");
        assert_eq!(room.door_offset_mm(), 100);
        assert_eq!(room.door_swing(), DoorSwing::InwardRight);
        assert_eq!(room.ceiling_height_mm(), 2500);
        assert_eq!(room.room_width_mm(), 3000);
        assert_eq!(room.room_depth_mm(), 3000);
        assert_eq!(room.style(), "modern");
        assert_eq!(room.output_size(), OutputSize::Landscape);
    }

    #[test]
    fn accepts_range_bounds() {
        for (field, value) in [
            (CEILING_HEIGHT_MM, 2000),
            (CEILING_HEIGHT_MM, 4000),
            (ROOM_WIDTH_MM, 1000),
            (ROOM_WIDTH_MM, 20000),
            (ROOM_DEPTH_MM, 1000),
            (ROOM_DEPTH_MM, 20000),
            (DOOR_OFFSET_MM, 0),
        ] {
            assert!(validate(&with(field, json!(value))).is_ok(), "{} = {}", field, value);
        }
    }

    #[test]
    fn single_violations_name_their_field() {
        let cases = [
            (CEILING_HEIGHT_MM, json!(1999)),
            (CEILING_HEIGHT_MM, json!(1500)),
            (CEILING_HEIGHT_MM, json!(4001)),
            (ROOM_WIDTH_MM, json!(500)),
            (ROOM_DEPTH_MM, json!(20001)),
            (DOOR_OFFSET_MM, json!(-1)),
            (DOOR_OFFSET_MM, json!(12.5)),
            (DOOR_SWING, json!("sideways")),
            (DOOR_SWING, json!(1)),
            (OUTPUT_SIZE, json!("1792x1024")),
            (WALL_FINISH, json!("")),
            (DOOR_OFFSET_MM, json!(MAX_DOOR_OFFSET_MM + 1)),
            (STYLE, json!(42)),
            (ROOM_WIDTH_MM, json!("3000")),
            (STYLE, Value::Null),
        ];
        for (field, value) in cases {
            let raw = with(field, value.clone());
            assert_eq!(rejected_fields(&raw), vec![field.to_string()], "{} = {}", field, value);
        }
    }

    #[test]
    fn reports_every_violation_together() {
        let raw = json!({
            "wallFinish": "",
            "doorOffsetMm": 100,
            "doorSwing": "sideways",
            "ceilingHeightMm": 1500,
            "roomWidthMm": 500,
            "roomDepthMm": 3000,
            "outputSize": "1536x1024"
        });
        let errors = validate(&raw).unwrap_err();
        for field in [WALL_FINISH, DOOR_SWING, CEILING_HEIGHT_MM, ROOM_WIDTH_MM, STYLE] {
            assert!(errors.has_field(field), "missing {}", field);
        }
        assert_eq!(errors.field_errors.len(), 5);
        assert_eq!(errors.field_errors[STYLE], vec!["Required".to_string()]);
    }

    #[test]
    fn whitespace_text_is_still_text() {
        let mut raw = with(WALL_FINISH, json!(" "));
        raw[STYLE] = json!("\t");
        let room = validate(&raw).unwrap();
        assert_eq!(room.wall_finish(), " ");
        assert_eq!(room.style(), "\t");
    }

    #[test]
    fn large_door_offsets_are_accepted() {
        let room = validate(&with(DOOR_OFFSET_MM, json!(5_000_000_000u64))).unwrap();
        assert_eq!(room.door_offset_mm(), 5_000_000_000);
        let room = validate(&with(DOOR_OFFSET_MM, json!(MAX_DOOR_OFFSET_MM))).unwrap();
        assert_eq!(room.door_offset_mm(), MAX_DOOR_OFFSET_MM);
    }

    #[test]
    fn integral_floats_are_accepted() {
        let room = validate(&with(CEILING_HEIGHT_MM, json!(2500.0))).unwrap();
        assert_eq!(room.ceiling_height_mm(), 2500);
    }

    #[test]
    fn non_object_body_is_a_form_error() {
        let errors = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.form_errors, vec!["Expected object, received array".to_string()]);
        assert!(errors.field_errors.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert!(validate(&with("furniture", json!("sofa"))).is_ok());
    }

    #[test]
    fn validation_round_trips() {
        let first = validate(&scenario_a()).unwrap();
        let second = validate(&first.to_raw()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn door_offset_is_not_checked_against_width_by_default() {
        assert!(validate(&with(DOOR_OFFSET_MM, json!(9000))).is_ok());
    }

    #[test]
    fn strict_policy_keeps_the_door_on_the_wall() {
        let strict = RoomValidator::new(ValidationPolicy { check_door_within_wall: true });
        assert!(strict.validate(&scenario_a()).is_ok());
        assert!(strict.validate(&with(DOOR_OFFSET_MM, json!(2585))).is_ok());

        let errors = strict.validate(&with(DOOR_OFFSET_MM, json!(2586))).unwrap_err();
        assert_eq!(errors.field_errors.len(), 1);
        assert!(errors.has_field(DOOR_OFFSET_MM));
    }

    #[test]
    fn strict_policy_skips_cross_check_when_width_is_invalid() {
        let strict = RoomValidator::new(ValidationPolicy { check_door_within_wall: true });
        let mut raw = with(ROOM_WIDTH_MM, json!(100));
        raw[DOOR_OFFSET_MM] = json!(9000);
        let errors = strict.validate(&raw).unwrap_err();
        assert!(errors.has_field(ROOM_WIDTH_MM));
        assert!(!errors.has_field(DOOR_OFFSET_MM));
    }
}
