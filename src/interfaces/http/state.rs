//! Process-wide state shared by every request.

use std::sync::Arc;

use crate::application::CredentialService;
use crate::domain::RepositoryProvider;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub repos: Arc<dyn RepositoryProvider>,
}

impl AppState {
    pub fn new(credentials: Arc<CredentialService>, repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { credentials, repos }
    }
}
