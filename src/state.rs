use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenCodec};
use crate::config::Config;
use crate::store::TodoStore;

/// Shared, read-only application state, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub tokens: TokenCodec,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            tokens: TokenCodec::from_config(config),
            passwords: PasswordHasher::new(config.bcrypt_cost),
        }
    }
}
