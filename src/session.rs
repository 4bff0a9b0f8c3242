/// Progress of a sampler session.
///
/// Transitions only move forward: `Uninitialized → BoundariesSet → PosteriorSet`.
/// Re-registering boundaries or a posterior replaces the stored handle without
/// moving the state back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    BoundariesSet,
    PosteriorSet,
}

impl SessionState {
    pub fn has_boundaries(self) -> bool {
        self >= SessionState::BoundariesSet
    }

    pub fn has_posterior(self) -> bool {
        self == SessionState::PosteriorSet
    }

    /// Returns the state after a successful registration step, never moving back.
    pub fn advance(self, to: SessionState) -> SessionState {
        self.max(to)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;

    #[test]
    fn advance_never_moves_back() {
        let state = SessionState::Uninitialized.advance(SessionState::PosteriorSet);
        assert_eq!(state.advance(SessionState::BoundariesSet), SessionState::PosteriorSet);
    }

    #[test]
    fn flags_follow_order() {
        assert!(!SessionState::Uninitialized.has_boundaries());
        assert!(SessionState::BoundariesSet.has_boundaries());
        assert!(!SessionState::BoundariesSet.has_posterior());
        assert!(SessionState::PosteriorSet.has_boundaries());
        assert!(SessionState::PosteriorSet.has_posterior());
    }
}
