use std::sync::Arc;

use crate::auth::AuthState;
use crate::job::JobService;
use crate::user::UserService;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub jobs: Arc<JobService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(users: UserService, jobs: JobService, auth: AuthState) -> Self {
        Self {
            users: Arc::new(users),
            jobs: Arc::new(jobs),
            auth,
        }
    }
}
