//! Failure bitmask for the double-stance checks

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Body parts checked against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BodyPart {
    /// Left foot position
    LeftFoot,
    /// Right foot position
    RightFoot,
    /// Left hand position
    LeftHand,
    /// Right hand position
    RightHand,
    /// Head/spine-mid/spine-base angle
    Trunk,
}

impl BodyPart {
    /// Every part, highest mask bit first
    pub const ALL: [BodyPart; 5] = [
        BodyPart::LeftFoot,
        BodyPart::RightFoot,
        BodyPart::LeftHand,
        BodyPart::RightHand,
        BodyPart::Trunk,
    ];

    /// The single-bit mask for this part
    pub const fn mask(self) -> FailureMask {
        match self {
            BodyPart::LeftFoot => FailureMask::LEFT_FOOT,
            BodyPart::RightFoot => FailureMask::RIGHT_FOOT,
            BodyPart::LeftHand => FailureMask::LEFT_HAND,
            BodyPart::RightHand => FailureMask::RIGHT_HAND,
            BodyPart::Trunk => FailureMask::TRUNK,
        }
    }

    /// Position in [`BodyPart::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name
    pub const fn name(self) -> &'static str {
        match self {
            BodyPart::LeftFoot => "left_foot",
            BodyPart::RightFoot => "right_foot",
            BodyPart::LeftHand => "left_hand",
            BodyPart::RightHand => "right_hand",
            BodyPart::Trunk => "trunk",
        }
    }
}

/// Which checks failed on a frame
///
/// Bit weights are fixed: left foot 16, right foot 8, left hand 4,
/// right hand 2, trunk 1. An empty mask means the frame passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FailureMask(u8);

impl FailureMask {
    /// Left foot moved
    pub const LEFT_FOOT: Self = Self(16);
    /// Right foot moved
    pub const RIGHT_FOOT: Self = Self(8);
    /// Left hand moved
    pub const LEFT_HAND: Self = Self(4);
    /// Right hand moved
    pub const RIGHT_HAND: Self = Self(2);
    /// Trunk tilted
    pub const TRUNK: Self = Self(1);
    /// Every check failed
    pub const ALL: Self = Self(0b1_1111);

    /// No failures
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from raw bits, dropping anything above bit 4
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bits
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// True when every check passed
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when all bits of `other` are set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Mark `other` as failed
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// True when either foot failed
    pub const fn is_foot(&self) -> bool {
        self.0 & (Self::LEFT_FOOT.0 | Self::RIGHT_FOOT.0) != 0
    }

    /// Failed parts, highest bit first
    pub fn iter(&self) -> impl Iterator<Item = BodyPart> + '_ {
        BodyPart::ALL.into_iter().filter(move |part| self.contains(part.mask()))
    }
}

impl BitOr for FailureMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FailureMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FailureMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05b}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FailureMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "FailureMask({=u8})", self.0)
    }
}
