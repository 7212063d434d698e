//! HTTP routes.

pub mod metrics;
pub mod signup;
pub mod status;

/// Build a state backed by in-memory collaborators, with light Argon2
/// parameters.
#[cfg(test)]
pub fn state() -> crate::AppState {
    use std::sync::Arc;

    use crate::adapters::{MemoryAccountRepository, RfcEmailValidator};
    use crate::config::Configuration;
    use crate::controller::SignupController;
    use crate::crypto::PasswordManager;

    let pwd = PasswordManager::new(Some(crate::crypto::tests::light_config()))
        .expect("valid argon2 parameters");
    let signup = SignupController::new(
        Arc::new(RfcEmailValidator),
        Arc::new(MemoryAccountRepository::new(pwd)),
    );

    crate::AppState {
        config: Arc::new(Configuration::default()),
        signup,
        metrics: None,
    }
}
