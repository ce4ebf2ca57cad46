//! Segmental Body Model Parameters
//!
//! Cadaver-based inertial data (Clauser, McConville & Young, 1969) as used
//! for segmental centre-of-mass estimation.
//!
//! Two numbers describe each segment:
//! - **CoG ratio**: distance of the segment's centre of gravity from the
//!   proximal joint, as a fraction of segment length.
//! - **Mass fraction**: share of total body mass carried by the segment.
//!
//! The mass fractions of all fourteen segments (counting left and right
//! limbs separately) sum to 1.0.

// ===== CENTRE OF GRAVITY RATIOS =====

/// Trunk centre of gravity, measured from spine-shoulder toward spine-base.
pub const COG_TRUNK: f32 = 0.438;

/// Upper arm centre of gravity, shoulder toward elbow.
pub const COG_UPPER_ARM: f32 = 0.491;

/// Forearm centre of gravity, elbow toward wrist.
pub const COG_FOREARM: f32 = 0.418;

/// Hand centre of gravity, wrist toward hand.
pub const COG_HAND: f32 = 0.82;

/// Thigh centre of gravity, hip toward knee.
pub const COG_THIGH: f32 = 0.4;

/// Calf centre of gravity, knee toward ankle.
pub const COG_CALF: f32 = 0.418;

/// Foot centre of gravity, ankle toward foot.
pub const COG_FOOT: f32 = 0.449;

// ===== MASS FRACTIONS =====

/// Head and neck share of body mass.
///
/// The sensor reports the centre of the head rather than the vertex, so no
/// segmental offset is applied for this segment.
pub const MASS_HEAD: f32 = 0.073;

/// Trunk share of body mass.
pub const MASS_TRUNK: f32 = 0.507;

/// Share of one upper arm.
pub const MASS_UPPER_ARM: f32 = 0.026;

/// Share of one forearm.
pub const MASS_FOREARM: f32 = 0.016;

/// Share of one hand.
pub const MASS_HAND: f32 = 0.007;

/// Share of one thigh.
pub const MASS_THIGH: f32 = 0.103;

/// Share of one calf.
pub const MASS_CALF: f32 = 0.043;

/// Share of one foot.
pub const MASS_FOOT: f32 = 0.015;
