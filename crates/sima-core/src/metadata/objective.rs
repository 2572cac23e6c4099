use crate::error::{Result, SimaError};

/// Pixel pitch in µm per objective magnification, as written to the index.
pub const OBJECTIVE_RESOLUTIONS: [(u32, &str); 5] = [
    (4, "1.6286"),
    (10, "0.6500"),
    (20, "0.3250"),
    (40, "0.1612"),
    (60, "0.1082"),
];

/// Look up the pixel pitch for an objective magnification.
pub fn pixel_pitch_um(magnification: u32) -> Result<&'static str> {
    OBJECTIVE_RESOLUTIONS
        .iter()
        .find(|(mag, _)| *mag == magnification)
        .map(|(_, pitch)| *pitch)
        .ok_or(SimaError::UnrecognizedObjective(magnification))
}
