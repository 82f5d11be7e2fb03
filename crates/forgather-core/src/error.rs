use thiserror::Error;

use forgather_rpc::RpcError;

/// Client-side failure taxonomy. `LoginRequired` and the validation variants
/// short-circuit before any network call; `Rpc` wraps a failed remote call.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("login required")]
    LoginRequired,
    #[error("selected {selected} options but the session allows {max}")]
    TooManySelections { selected: usize, max: u32 },
    #[error("voting session is closed or past its deadline")]
    SessionClosed,
    #[error("voting session is not loaded")]
    UnknownSession,
    /// The backend answered the vote call but reported `success = false`
    /// (duplicate vote, quorum rules, selection limit).
    #[error("vote was not accepted")]
    VoteRejected,
    #[error("terms must be accepted before joining")]
    TermsNotAccepted,
    #[error("invalid input: {0}")]
    Validation(&'static str),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl CoreError {
    /// Catalog key of the localized toast for this failure.
    pub fn message_key(&self) -> &'static str {
        match self {
            CoreError::LoginRequired => "auth.login_required",
            CoreError::TooManySelections { .. } => "vote.too_many_selections",
            CoreError::SessionClosed => "vote.session_closed",
            CoreError::UnknownSession => "vote.unknown_session",
            CoreError::VoteRejected => "error.rejected",
            CoreError::TermsNotAccepted => "join.terms_required",
            CoreError::Validation(_) => "error.validation",
            CoreError::Rpc(err) => err.message_key(),
        }
    }

    /// Whether this failure was raised before any backend call was issued.
    pub fn is_local(&self) -> bool {
        !matches!(self, CoreError::Rpc(_) | CoreError::VoteRejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backend_failures_count_as_remote() {
        assert!(CoreError::LoginRequired.is_local());
        assert!(CoreError::SessionClosed.is_local());
        assert!(CoreError::TermsNotAccepted.is_local());
        assert!(CoreError::Validation("title is required").is_local());

        assert!(!CoreError::VoteRejected.is_local());
        let remote = CoreError::Rpc(RpcError::Http("connection refused".to_string()));
        assert!(!remote.is_local());
    }
}
