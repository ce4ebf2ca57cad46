//! Operator-facing text for one frame
//!
//! The engine reports structure (masks, deltas, events); these helpers
//! render it the way the examiner's screen shows it.

use bess_core::{
    session::FrameReport,
    tracking::{BodyPart, TrackingState},
};

/// Headline status line
///
/// A finishing frame wins over everything else; an eyes-open error wins
/// over the pose status.
pub fn status_text(report: &FrameReport) -> String {
    if report.finished {
        return if report.state == TrackingState::Identified {
            "Finished successfully".to_string()
        } else {
            format!("Time is up. # of errors: {}", report.error_count)
        };
    }

    if report.eyes_error() {
        return "Eye(s) opened error".to_string();
    }

    if report.mask.is_empty() {
        format!("Double stance pose is okay. # errors: {}", report.error_count)
    } else {
        format!("Double stance pose with error. # of errors: {}", report.error_count)
    }
}

/// One line per checked body part, in mask bit order
///
/// Passing parts read `OK`; failing parts show their delta, or
/// `NOT TRACKED` when no delta could be computed.
pub fn limb_lines(report: &FrameReport) -> Vec<String> {
    BodyPart::ALL
        .iter()
        .map(|&part| {
            let label = label(part);
            if !report.mask.contains(part.mask()) {
                return format!("{} OK", label);
            }

            match part {
                BodyPart::Trunk => match report.deviations.trunk_angle_deg {
                    Some(delta) => format!("{} Δ={:+.1}°", label, delta),
                    None => format!("{} NOT TRACKED", label),
                },
                _ => match report.deviations.limb(part) {
                    Some(d) => format!("{} dx={:+.3} dy={:+.3} dz={:+.3}", label, d.x, d.y, d.z),
                    None => format!("{} NOT TRACKED", label),
                },
            }
        })
        .collect()
}

/// Eyes indicator
pub fn eyes_text(eyes_open: Option<bool>) -> &'static str {
    match eyes_open {
        Some(true) => "EYES: OPEN",
        Some(false) => "EYES: CLOSED",
        None => "EYES: NOT TRACKED",
    }
}

fn label(part: BodyPart) -> &'static str {
    match part {
        BodyPart::LeftFoot => "LEFT FOOT",
        BodyPart::RightFoot => "RIGHT FOOT",
        BodyPart::LeftHand => "LEFT HAND",
        BodyPart::RightHand => "RIGHT HAND",
        BodyPart::Trunk => "TRUNK",
    }
}
