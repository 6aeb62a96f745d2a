use crate::error::AppError;
use crate::models::users::Role;
use crate::models::{matches, reviews};

/// The authenticated caller: their role and numeric user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    pub id: i64,
}

/// A record with one participant per role.
pub trait Participants {
    fn participant_id(&self, role: Role) -> i64;
}

impl Participants for matches::Model {
    fn participant_id(&self, role: Role) -> i64 {
        match role {
            Role::Planner => self.planner_id,
            Role::Couple => self.couple_id,
        }
    }
}

impl Participants for reviews::Model {
    fn participant_id(&self, role: Role) -> i64 {
        match role {
            Role::Planner => self.planner_id,
            Role::Couple => self.couple_id,
        }
    }
}

/// Fails with `PermissionDenied` unless the caller is the participant for their role.
pub fn check_participant<P: Participants>(identity: Identity, record: &P) -> Result<(), AppError> {
    if record.participant_id(identity.role) == identity.id {
        Ok(())
    } else {
        Err(AppError::permission_denied())
    }
}

/// Fails with `PermissionDenied` unless the caller has `role`.
pub fn require_role(identity: Identity, role: Role) -> Result<(), AppError> {
    if identity.role == role {
        Ok(())
    } else {
        Err(AppError::permission_denied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::MatchStatus;

    fn chat(couple_id: i64, planner_id: i64) -> matches::Model {
        matches::Model {
            id: 1,
            couple_id,
            planner_id,
            status: MatchStatus::Unconfirmed,
            confirmed_price: 0,
            confirmed_at: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn participants_pass_for_their_own_role() {
        let m = chat(1, 2);
        assert!(check_participant(Identity { role: Role::Couple, id: 1 }, &m).is_ok());
        assert!(check_participant(Identity { role: Role::Planner, id: 2 }, &m).is_ok());
    }

    #[test]
    fn id_is_compared_against_the_role_slot_only() {
        // Couple 2 is not the couple on this match even though 2 is its planner id.
        let m = chat(1, 2);
        let err = check_participant(Identity { role: Role::Couple, id: 2 }, &m).unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));

        let err = check_participant(Identity { role: Role::Planner, id: 1 }, &m).unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }

    #[test]
    fn require_role_rejects_other_roles() {
        let planner = Identity { role: Role::Planner, id: 5 };
        assert!(require_role(planner, Role::Planner).is_ok());
        assert!(matches!(
            require_role(planner, Role::Couple),
            Err(AppError::PermissionDenied(_))
        ));
    }
}
