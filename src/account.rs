//! Account creation contracts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BoxError;

/// Data needed to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddAccountModel {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Account as returned by an [`AddAccount`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Create accounts.
#[async_trait]
pub trait AddAccount: Send + Sync {
    /// Create a new account.
    async fn add(
        &self,
        account: AddAccountModel,
    ) -> Result<AccountModel, BoxError>;
}

/// Check email addresses format.
pub trait EmailValidator: Send + Sync {
    /// Whether `email` is a well-formed address.
    fn is_valid(&self, email: &str) -> Result<bool, BoxError>;
}
