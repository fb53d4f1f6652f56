//! Room domain: the validated description and the validator that builds it.
pub mod description;
pub mod validator;

pub use description::{DoorSwing, OutputSize, RoomDescription};
pub use validator::{RoomValidator, ValidationErrors, ValidationPolicy};
