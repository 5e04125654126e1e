//! Gates for authenticated and admin-only views.

use crate::store::core::AuthState;

/// Where a refused visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sign-in view.
    Login,
    /// Public landing view.
    Home,
}

/// Decision for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The store has not been rehydrated yet; show a loading state.
    Pending,
    /// Render the guarded view.
    Allow,
    #[allow(missing_docs)]
    Redirect(Route),
}

/// Access requirement of a view.
///
/// ```
/// use scribe::AuthState;
/// use scribe::guards::{Guard, GuardOutcome, Route};
///
/// let loaded = AuthState { initialized: true, ..AuthState::default() };
/// assert_eq!(Guard::Authenticated.check(&loaded), GuardOutcome::Redirect(Route::Login));
/// assert_eq!(Guard::Admin.check(&loaded), GuardOutcome::Redirect(Route::Home));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users with the admin role. Everyone else goes home.
    Admin,
}

impl Guard {
    /// Decide for `state`.
    pub fn check(self, state: &AuthState) -> GuardOutcome {
        if !state.initialized {
            return GuardOutcome::Pending;
        }
        match self {
            Guard::Authenticated if state.is_authenticated => GuardOutcome::Allow,
            Guard::Authenticated => GuardOutcome::Redirect(Route::Login),
            Guard::Admin if state.is_admin() => GuardOutcome::Allow,
            Guard::Admin => GuardOutcome::Redirect(Route::Home),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_common::{Role, User};

    fn signed_in(role: Role) -> AuthState {
        AuthState {
            user: Some(User {
                id: "u1".into(),
                name: "Ann".into(),
                email: "ann@example.com".into(),
                role,
                avatar: None,
                bio: None,
                created_at: None,
                updated_at: None,
            }),
            token: Some("t".into()),
            refresh_token: None,
            is_authenticated: true,
            initialized: true,
        }
    }

    #[test]
    fn pending_until_initialized() {
        let mut state = signed_in(Role::Admin);
        state.initialized = false;
        assert_eq!(Guard::Authenticated.check(&state), GuardOutcome::Pending);
        assert_eq!(Guard::Admin.check(&state), GuardOutcome::Pending);
    }

    #[test]
    fn authenticated_guard() {
        assert_eq!(
            Guard::Authenticated.check(&signed_in(Role::User)),
            GuardOutcome::Allow
        );
        let anon = AuthState {
            initialized: true,
            ..AuthState::default()
        };
        assert_eq!(
            Guard::Authenticated.check(&anon),
            GuardOutcome::Redirect(Route::Login)
        );
    }

    #[test]
    fn admin_guard() {
        assert_eq!(Guard::Admin.check(&signed_in(Role::Admin)), GuardOutcome::Allow);
        assert_eq!(
            Guard::Admin.check(&signed_in(Role::User)),
            GuardOutcome::Redirect(Route::Home)
        );
    }
}
