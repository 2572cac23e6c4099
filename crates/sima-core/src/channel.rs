use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimaError};

/// How a channel was acquired.
///
/// Index rows always spell the non-confocal variant `NonConfocal`, backfilled
/// rows included; `Nonconfocal` is still accepted when reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionType {
    Confocal,
    #[serde(alias = "Nonconfocal")]
    NonConfocal,
}

impl AcquisitionType {
    /// Guess from a channel name: phase contrast and bright field images are
    /// non-confocal, everything else confocal.
    pub fn from_channel_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("phase") || lower.contains("bright") {
            Self::NonConfocal
        } else {
            Self::Confocal
        }
    }
}

impl fmt::Display for AcquisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confocal => write!(f, "Confocal"),
            Self::NonConfocal => write!(f, "NonConfocal"),
        }
    }
}

/// One physical channel slot within a multiplexed frame group.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSlot {
    pub name: String,
    pub acquisition_type: AcquisitionType,
    /// Hex display color, e.g. `#0035ff`.
    pub color: String,
}

/// Ordered channel slots; index = position within each frame group.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelAssignment {
    slots: Vec<ChannelSlot>,
}

impl ChannelAssignment {
    pub fn new(slots: Vec<ChannelSlot>) -> Result<Self> {
        if slots.is_empty() {
            return Err(SimaError::EmptyChannelAssignment);
        }
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&ChannelSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[ChannelSlot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_from_name() {
        assert_eq!(
            AcquisitionType::from_channel_name("Bright Field"),
            AcquisitionType::NonConfocal
        );
        assert_eq!(
            AcquisitionType::from_channel_name("High Contrast PHASE"),
            AcquisitionType::NonConfocal
        );
        assert_eq!(
            AcquisitionType::from_channel_name("DAPI"),
            AcquisitionType::Confocal
        );
    }

    #[test]
    fn test_empty_assignment_rejected() {
        assert!(ChannelAssignment::new(vec![]).is_err());
    }
}
