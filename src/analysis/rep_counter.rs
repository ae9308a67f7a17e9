// src/analysis/rep_counter.rs
//
// Two-phase rep counting over consecutive evaluated frames. Transitions
// are edge-triggered on the mode's driving angle; a rep completes on
// the Down -> Up edge only, so oscillation on one side of a threshold
// never inflates the count.

use crate::types::{AngleKind, ExerciseMode, Phase, SessionState};

// ============================================================================
// TRANSITION EDGES (degrees on the driving angle)
// ============================================================================
const CURL_DESCENT_EDGE: f64 = 160.0; // Up -> Down above this
const CURL_ASCENT_EDGE: f64 = 50.0; // Down -> Up below this, rep counted

const PUSHUP_DESCENT_EDGE: f64 = 90.0; // Up -> Down below this
const PUSHUP_ASCENT_EDGE: f64 = 160.0; // Down -> Up above this, rep counted

// Squats use one shared edge for both directions, inherited as-is. A
// knee hovering around 90 degrees will chatter and rack up reps; a
// hysteresis band would fix it but would change counted behavior, so
// the single edge stays. Exactly 90.0 moves in neither direction.
const SQUAT_EDGE: f64 = 90.0;

/// Advance the session's phase machine with this frame's angles.
/// Returns true when a rep completed on this frame.
pub fn advance(state: &mut SessionState, angles: &[(AngleKind, f64)]) -> bool {
    let Some(driver) = driving_angle(state.mode, angles) else {
        return false;
    };

    match state.mode {
        ExerciseMode::BicepCurl => match state.phase {
            Phase::Up if driver > CURL_DESCENT_EDGE => {
                state.phase = Phase::Down;
                false
            }
            Phase::Down if driver < CURL_ASCENT_EDGE => {
                state.phase = Phase::Up;
                state.rep_count += 1;
                true
            }
            _ => false,
        },
        ExerciseMode::Pushup => match state.phase {
            Phase::Up if driver < PUSHUP_DESCENT_EDGE => {
                state.phase = Phase::Down;
                false
            }
            Phase::Down if driver > PUSHUP_ASCENT_EDGE => {
                state.phase = Phase::Up;
                state.rep_count += 1;
                true
            }
            _ => false,
        },
        ExerciseMode::Squat => match state.phase {
            Phase::Up if driver < SQUAT_EDGE => {
                state.phase = Phase::Down;
                false
            }
            Phase::Down if driver > SQUAT_EDGE => {
                state.phase = Phase::Up;
                state.rep_count += 1;
                true
            }
            _ => false,
        },
        // Informational mode, nothing to count.
        ExerciseMode::GeneralPose => false,
    }
}

fn driving_angle(mode: ExerciseMode, angles: &[(AngleKind, f64)]) -> Option<f64> {
    let kind = match mode {
        ExerciseMode::BicepCurl | ExerciseMode::Pushup => AngleKind::Elbow,
        ExerciseMode::Squat => AngleKind::Knee,
        ExerciseMode::GeneralPose => return None,
    };
    angles.iter().find(|(k, _)| *k == kind).map(|(_, v)| *v)
}
