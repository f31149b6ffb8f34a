//! Filter outcomes

use std::fmt;

/// Result of a measurement or lookup against host data
///
/// `Unknown` records that the host could not answer, so the caller can
/// tell a confirmed value from a fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment<T> {
    Known(T),
    Unknown(String),
}

impl<T> Assessment<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Assessment::Known(_))
    }
}

/// Why a link survived the filter
#[derive(Debug, Clone, PartialEq)]
pub enum KeepReason {
    /// Filtering is turned off
    FilterDisabled,
    /// Parent of at least one joint
    Structural,
    /// Diagonal at or above the threshold
    Large { diagonal_cm: f64 },
    /// Link has no bodies to measure
    NoBodies,
    /// Bounding box could not be computed
    SizeUnknown(String),
    /// Joint parents could not be fully resolved
    StructureUnknown(String),
}

/// Per-link decision of the small part filter
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Keep(KeepReason),
    Remove { diagonal_cm: f64 },
}

impl Decision {
    pub fn is_removed(&self) -> bool {
        matches!(self, Decision::Remove { .. })
    }

    /// True when the link was kept only because host data was missing
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Decision::Keep(KeepReason::SizeUnknown(_) | KeepReason::StructureUnknown(_))
        )
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Remove { diagonal_cm } => {
                write!(f, "REMOVE (small, diagonal={diagonal_cm:.2}cm)")
            }
            Decision::Keep(reason) => match reason {
                KeepReason::FilterDisabled => write!(f, "KEEP (filter disabled)"),
                KeepReason::Structural => write!(f, "KEEP (structural)"),
                KeepReason::Large { diagonal_cm } => {
                    write!(f, "KEEP (large, diagonal={diagonal_cm:.2}cm)")
                }
                KeepReason::NoBodies => write!(f, "KEEP (no bodies)"),
                KeepReason::SizeUnknown(why) => write!(f, "KEEP (size unknown: {why})"),
                KeepReason::StructureUnknown(why) => {
                    write!(f, "KEEP (structure unknown: {why})")
                }
            },
        }
    }
}
