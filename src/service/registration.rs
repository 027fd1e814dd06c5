use crate::db::sqlite::AccountStorage;
use crate::error::MindwellError;
use crate::service::password;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fields default to empty when absent so an omitted field and an empty one
/// take the same rejection path.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The only account fields ever echoed back to a caller.
#[derive(Debug, Serialize, PartialEq)]
pub struct RegisteredUser {
    pub name: String,
    pub email: String,
}

/// Create-account use case. Holds the injected storage handle; cheap to
/// clone into each request.
#[derive(Clone)]
pub struct RegistrationService {
    storage: AccountStorage,
}

impl RegistrationService {
    pub fn new(storage: AccountStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &AccountStorage {
        &self.storage
    }

    /// Turn a registration request into exactly one new account, or a
    /// well-defined rejection.
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisteredUser, MindwellError> {
        let RegisterRequest {
            name,
            email,
            password,
        } = req;

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(MindwellError::MissingFields);
        }

        // Pre-check saves the hashing work for the common duplicate case.
        // It is only an optimization: a racing insert can still slip past it,
        // and the store's UNIQUE constraint settles that race.
        if self.storage.find_by_email(&email).await?.is_some() {
            debug!(%email, "registration rejected: email already taken");
            return Err(MindwellError::DuplicateAccount);
        }

        // Hash derivation is CPU-bound; run it off the async runtime so it
        // cannot stall other in-flight requests.
        let password_hash = tokio::task::spawn_blocking(move || password::hash(&password)).await??;

        let id = self.storage.insert(&name, &email, &password_hash).await?;
        info!(%email, id, "account created");

        Ok(RegisteredUser { name, email })
    }
}
