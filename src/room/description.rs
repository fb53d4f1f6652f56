//! The validated room record and its enumerated fields.
//!
//! A `RoomDescription` can only be obtained through
//! [`RoomValidator`](crate::room::validator::RoomValidator); its fields are
//! private and exposed read-only.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

/// Which way the door leaf opens, seen from inside the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoorSwing {
    #[serde(rename = "inward-right")]
    InwardRight,
    #[serde(rename = "inward-left")]
    InwardLeft,
}

impl DoorSwing {
    pub const ALL: [DoorSwing; 2] = [DoorSwing::InwardRight, DoorSwing::InwardLeft];

    pub fn as_str(&self) -> &'static str {
        match self {
            DoorSwing::InwardRight => "inward-right",
            DoorSwing::InwardLeft => "inward-left",
        }
    }
}

/// Image sizes accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutputSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1536x1024")]
    Landscape,
    #[serde(rename = "1024x1536")]
    Portrait,
}

impl OutputSize {
    pub const ALL: [OutputSize; 3] = [OutputSize::Square, OutputSize::Landscape, OutputSize::Portrait];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Square => "1024x1024",
            OutputSize::Landscape => "1536x1024",
            OutputSize::Portrait => "1024x1536",
        }
    }
}

/// Returned when a string names none of an enum's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl FromStr for DoorSwing {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DoorSwing::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for OutputSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputSize::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for DoorSwing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to describe the empty room to the image model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDescription {
    wall_finish: String,
    door_offset_mm: u64,
    door_swing: DoorSwing,
    ceiling_height_mm: u32,
    room_width_mm: u32,
    room_depth_mm: u32,
    style: String,
    output_size: OutputSize,
}

impl RoomDescription {
    // Only the validator builds these.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        wall_finish: String,
        door_offset_mm: u64,
        door_swing: DoorSwing,
        ceiling_height_mm: u32,
        room_width_mm: u32,
        room_depth_mm: u32,
        style: String,
        output_size: OutputSize,
    ) -> Self {
        RoomDescription {
            wall_finish,
            door_offset_mm,
            door_swing,
            ceiling_height_mm,
            room_width_mm,
            room_depth_mm,
            style,
            output_size,
        }
    }

    pub fn wall_finish(&self) -> &str {
        &self.wall_finish
    }

    pub fn door_offset_mm(&self) -> u64 {
        self.door_offset_mm
    }

    pub fn door_swing(&self) -> DoorSwing {
        self.door_swing
    }

    pub fn ceiling_height_mm(&self) -> u32 {
        self.ceiling_height_mm
    }

    pub fn room_width_mm(&self) -> u32 {
        self.room_width_mm
    }

    pub fn room_depth_mm(&self) -> u32 {
        self.room_depth_mm
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn output_size(&self) -> OutputSize {
        self.output_size
    }

    /// Serialize back into the raw request shape.
    pub fn to_raw(&self) -> Value {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
