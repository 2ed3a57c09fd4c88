// libs/booking-cell/src/services/lifecycle.rs
use crate::models::AppointmentStatus;

/// Button-level gating: the transitions each role gets a button for. This
/// is the only gate; the store itself stays unconditional. Doctors can
/// restore a cancelled appointment back to confirmed ("rétablir" in the
/// doctor-side views); patients can only cancel what is still upcoming.
pub fn allowed_transitions(role: &str, current: &AppointmentStatus) -> Vec<AppointmentStatus> {
    use AppointmentStatus::*;

    match role {
        "doctor" => match current {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![Completed, Cancelled],
            Cancelled => vec![Confirmed],
            Completed => vec![],
        },
        "patient" => match current {
            Pending | Confirmed => vec![Cancelled],
            Completed | Cancelled => vec![],
        },
        _ => vec![],
    }
}

pub fn can_apply(role: &str, current: &AppointmentStatus, new: &AppointmentStatus) -> bool {
    allowed_transitions(role, current).contains(new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn doctor_can_restore_cancelled() {
        assert!(can_apply("doctor", &Cancelled, &Confirmed));
        assert!(!can_apply("patient", &Cancelled, &Confirmed));
    }

    #[test]
    fn patient_can_only_cancel_upcoming() {
        assert!(can_apply("patient", &Pending, &Cancelled));
        assert!(can_apply("patient", &Confirmed, &Cancelled));
        assert!(!can_apply("patient", &Confirmed, &Completed));
        assert!(!can_apply("patient", &Completed, &Cancelled));
    }

    #[test]
    fn completed_is_terminal_for_everyone() {
        assert!(allowed_transitions("doctor", &Completed).is_empty());
        assert!(allowed_transitions("patient", &Completed).is_empty());
    }

    #[test]
    fn unknown_role_gets_no_buttons() {
        assert!(allowed_transitions("admin", &Pending).is_empty());
    }
}
