use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::{AccountModel, AddAccount, AddAccountModel};
use crate::crypto::{PasswordManager, random_id};
use crate::error::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("email is already in use")]
    EmailTaken,
}

/// In-memory [`AddAccount`] keeping accounts for the process lifetime.
///
/// Passwords are stored as Argon2id PHC strings.
#[derive(Clone)]
pub struct MemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, AccountModel>>>,
    pwd: PasswordManager,
}

impl MemoryAccountRepository {
    /// Create a new [`MemoryAccountRepository`].
    pub fn new(pwd: PasswordManager) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            pwd,
        }
    }

    /// Find an account using its email address.
    #[cfg(test)]
    pub async fn find_by_email(&self, email: &str) -> Option<AccountModel> {
        self.accounts
            .read()
            .await
            .get(&email.to_lowercase())
            .cloned()
    }

    /// Number of created accounts.
    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AddAccount for MemoryAccountRepository {
    async fn add(
        &self,
        account: AddAccountModel,
    ) -> Result<AccountModel, BoxError> {
        let key = account.email.to_lowercase();
        if self.accounts.read().await.contains_key(&key) {
            return Err(RepositoryError::EmailTaken.into());
        }

        let password = self.pwd.hash_password(&account.password)?;
        let created = AccountModel {
            id: random_id(),
            name: account.name,
            email: account.email,
            password,
        };

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(RepositoryError::EmailTaken.into());
        }
        accounts.insert(key, created.clone());

        tracing::debug!(user_id = %created.id, "account created");

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::tests::light_config;

    fn repository() -> MemoryAccountRepository {
        MemoryAccountRepository::new(
            PasswordManager::new(Some(light_config())).unwrap(),
        )
    }

    fn jane() -> AddAccountModel {
        AddAccountModel {
            name: "Jane".into(),
            email: "jane@x.com".into(),
            password: "p1".into(),
        }
    }

    #[tokio::test]
    async fn test_add_account() {
        let repo = repository();
        let account = repo.add(jane()).await.unwrap();

        assert_eq!(account.name, "Jane");
        assert_eq!(account.email, "jane@x.com");
        assert!(!account.id.is_empty());
        assert_ne!(account.password, "p1");
        assert!(repo.pwd.verify_password("p1", &account.password).is_ok());

        assert_eq!(repo.find_by_email("JANE@x.com").await, Some(account));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = repository();
        repo.add(jane()).await.unwrap();

        let err = repo
            .add(AddAccountModel {
                email: "Jane@X.com".into(),
                ..jane()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), RepositoryError::EmailTaken.to_string());
        assert_eq!(repo.count().await, 1);
    }
}
