//! Startup identity check.

use faultfinder_session::AuthState;
use tracing::{info, instrument};

use crate::auth::{AuthApi, User};

/// Run the identity check once at startup and settle the initial state.
///
/// The state ends up authenticated if the check succeeds and logged out
/// otherwise; in both cases the initial load is marked complete. Calling this
/// again re-checks identity but never flips `initializing` back.
#[instrument(skip_all)]
pub async fn initial_load(auth: &AuthApi, state: &AuthState) -> Option<User> {
    let user = match auth.retrieve_user().await {
        Ok(user) => {
            state.mark_authenticated();
            info!(username = %user.username, "Session restored");
            Some(user)
        }
        Err(err) => {
            state.mark_logged_out();
            info!(error = %err, "No active session");
            None
        }
    };

    state.mark_initial_load_complete();
    user
}
