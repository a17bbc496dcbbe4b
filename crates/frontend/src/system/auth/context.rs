use contracts::domain::common::ApprovalRole;
use contracts::system::auth::StoredUser;
use leptos::prelude::*;
use std::cell::Cell;

use super::storage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<StoredUser>,
}

impl AuthState {
    /// Session as persisted in localStorage. A token without a user is kept:
    /// the user id check happens when a mutation is attempted.
    pub fn restore() -> Self {
        Self {
            token: storage::get_token(),
            user: storage::get_user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(|u| u.user_id())
            .map(str::to_string)
    }

    pub fn approval_roles(&self) -> Vec<ApprovalRole> {
        self.user
            .as_ref()
            .map(|u| ApprovalRole::allowed_for(&u.role))
            .unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }
}

thread_local! {
    static SESSION_SETTER: Cell<Option<WriteSignal<AuthState>>> = const { Cell::new(None) };
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::restore());
    SESSION_SETTER.with(|cell| cell.set(Some(set_auth_state)));

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Store a fresh session and switch the app to the main layout.
pub fn sign_in(set_auth_state: WriteSignal<AuthState>, token: String, user: StoredUser) {
    storage::save_session(&token, &user);
    set_auth_state.set(AuthState {
        token: Some(token),
        user: Some(user),
    });
}

pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}

/// Drop the session after a 401. Callable from request helpers that run
/// outside the component tree.
pub fn expire_session() {
    log::warn!("Session expired, returning to login");
    storage::clear_session();
    SESSION_SETTER.with(|cell| {
        if let Some(setter) = cell.get() {
            setter.set(AuthState::default());
        }
    });
}
