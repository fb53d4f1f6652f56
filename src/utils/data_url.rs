use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::gateway::GeneratedImage;

/// Encode an image as `data:<mime>;base64,<payload>`.
pub fn encode(image: &GeneratedImage) -> String {
    format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes))
}
