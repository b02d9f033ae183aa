//! Fault taxonomy

use serde::{Deserialize, Serialize};

/// Outcome of a single analysis.
///
/// `None`..`Looseness` are diagnoses; `Unmeasurable` and `InsufficientData`
/// mean no harmonic claim could be made. The discriminant is the fault code
/// used by the flat result encoding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    None = 0,
    Unbalance = 1,
    Misalignment = 2,
    Looseness = 3,
    Unmeasurable = 4,
    InsufficientData = 5,
}

impl FaultKind {
    /// Integer code for flat encodings.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`FaultKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Unbalance),
            2 => Some(Self::Misalignment),
            3 => Some(Self::Looseness),
            4 => Some(Self::Unmeasurable),
            5 => Some(Self::InsufficientData),
            _ => None,
        }
    }

    /// True for the three mechanical fault verdicts.
    pub fn is_fault(self) -> bool {
        matches!(self, Self::Unbalance | Self::Misalignment | Self::Looseness)
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultKind::None => write!(f, "NONE"),
            FaultKind::Unbalance => write!(f, "UNBALANCE"),
            FaultKind::Misalignment => write!(f, "MISALIGNMENT"),
            FaultKind::Looseness => write!(f, "LOOSENESS"),
            FaultKind::Unmeasurable => write!(f, "UNMEASURABLE"),
            FaultKind::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

impl Default for FaultKind {
    fn default() -> Self {
        FaultKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_declaration_order() {
        let all = [
            FaultKind::None,
            FaultKind::Unbalance,
            FaultKind::Misalignment,
            FaultKind::Looseness,
            FaultKind::Unmeasurable,
            FaultKind::InsufficientData,
        ];
        for (i, kind) in all.iter().enumerate() {
            assert_eq!(kind.code() as usize, i);
            assert_eq!(FaultKind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(FaultKind::from_code(6), None);
    }

    #[test]
    fn test_is_fault() {
        assert!(FaultKind::Looseness.is_fault());
        assert!(!FaultKind::None.is_fault());
        assert!(!FaultKind::Unmeasurable.is_fault());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FaultKind::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
    }
}
