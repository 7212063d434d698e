use validator::ValidateEmail;

use crate::account::EmailValidator;
use crate::error::BoxError;

/// [`EmailValidator`] following HTML5 and RFC 5322 rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfcEmailValidator;

impl EmailValidator for RfcEmailValidator {
    fn is_valid(&self, email: &str) -> Result<bool, BoxError> {
        Ok(email.validate_email())
    }
}
