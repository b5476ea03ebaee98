use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    Conflict(#[from] Conflict),

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// State conflicts: the request is well-formed but the current state rejects it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("already swiped on this user")]
    DuplicateSwipe,

    #[error("cannot swipe on yourself")]
    CannotSwipeSelf,

    #[error("team is not accepting new members")]
    TeamClosed,

    #[error("user is already in a team for this hackathon")]
    AlreadyTeamed,

    #[error("team is full")]
    TeamFull { current: i64, max: i32 },

    #[error("you already have a team for this hackathon")]
    AlreadyCaptain,

    #[error("captain cannot leave the team")]
    CaptainCannotLeave,

    #[error("cannot kick yourself")]
    CannotKickSelf,

    #[error("user is not a member of this team")]
    NotTeamMember,

    #[error("you must be registered for a hackathon first")]
    NotRegistered,

    #[error("already registered for this hackathon")]
    AlreadyRegistered,

    #[error("registration is not open")]
    RegistrationClosed,

    #[error("hackathon team limit reached")]
    TeamLimitReached,

    #[error("invite already processed")]
    InviteAlreadyProcessed,

    #[error("join request already processed")]
    RequestAlreadyProcessed,

    #[error("user already has a pending invite from this team")]
    PendingInviteExists,

    #[error("you already have a pending request for this team")]
    PendingRequestExists,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_resource() {
        assert_eq!(StorageError::NotFound("team").to_string(), "team not found");
    }

    #[test]
    fn test_plain_errors_are_not_unique_violations() {
        assert!(!StorageError::NotFound("user").is_unique_violation());
        assert!(!StorageError::from(Conflict::DuplicateSwipe).is_unique_violation());
    }
}
