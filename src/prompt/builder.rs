//! Deterministic prompt text for a validated room.
//!
//! The prompt is one line per section, always in the same order, so two rooms
//! that differ in a single field produce prompts that differ on a single line.
use crate::room::RoomDescription;

/// Reference door leaf, height × width in millimetres.
pub const REFERENCE_DOOR_MM: (u32, u32) = (2040, 830);
/// Handle height stated to the model.
pub const HANDLE_HEIGHT_MM: u32 = 1050;

const FRAMING: &str =
    "Create a photorealistic interior rendering of an empty rectangular room, normal camera perspective.";
const GEOMETRY_HEADER: &str = "GEOMETRY REQUIREMENTS (follow the proportions exactly):";
const NO_FURNITURE: &str = "- No furniture. Straight walls, simple floor base (skirting board).";
const PERSPECTIVE: &str = "- Correct linear perspective, realistic shadows and materials.";
const FORMAT: &str = "FORMAT: Orientation (landscape/portrait) follows the requested image size. No text in the image.";

/// Build the instruction string sent to the image model.
pub fn build_prompt(room: &RoomDescription) -> String {
    let (door_height, door_width) = REFERENCE_DOOR_MM;
    let lines = [
        FRAMING.to_string(),
        GEOMETRY_HEADER.to_string(),
        format!(
            "- Interior dimensions: width {} mm × depth {} mm; ceiling height {} mm.",
            room.room_width_mm(),
            room.room_depth_mm(),
            room.ceiling_height_mm()
        ),
        format!(
            "- One interior door in the front wall: the door's centerline is {} mm from the left wall. \
             Door leaf swing: {}. Standard door ~{}×{} mm, handle at standard height (~{} mm).",
            room.door_offset_mm(),
            room.door_swing(),
            door_height,
            door_width,
            HANDLE_HEIGHT_MM
        ),
        format!("- Wall color/finish: {}.", room.wall_finish()),
        NO_FURNITURE.to_string(),
        PERSPECTIVE.to_string(),
        format!("STYLE: {}.", room.style()),
        FORMAT.to_string(),
    ];
    lines.join("\n")
}
