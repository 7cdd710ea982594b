use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("bcrypt cost {0} is outside {}..={}", MIN_BCRYPT_COST, MAX_BCRYPT_COST)]
    InvalidCost(u32),
}

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt only reads this many bytes of input.
pub const BCRYPT_MAX_BYTES: usize = 72;

/// How passwords are stored and compared.
///
/// `Bcrypt` is the default. `LegacyPlaintext` keeps the historical behavior of
/// storing the password as given and comparing by equality, and only exists so
/// an existing database can keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    Bcrypt { cost: u32 },
    LegacyPlaintext,
}

impl PasswordPolicy {
    pub fn from_config(config: &crate::config::SecurityConfig) -> Result<Self, PasswordError> {
        if config.legacy_plaintext_passwords {
            return Ok(PasswordPolicy::LegacyPlaintext);
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&config.bcrypt_cost) {
            return Err(PasswordError::InvalidCost(config.bcrypt_cost));
        }
        Ok(PasswordPolicy::Bcrypt { cost: config.bcrypt_cost })
    }

    /// Produce the value written to the `password` column.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match *self {
            PasswordPolicy::LegacyPlaintext => Ok(password.to_string()),
            PasswordPolicy::Bcrypt { cost } => {
                let password = password.to_string();
                let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
                Ok(hashed)
            }
        }
    }

    /// Compare a candidate password against the stored column value.
    ///
    /// Under bcrypt, input longer than [`BCRYPT_MAX_BYTES`] never matches.
    pub async fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        match *self {
            PasswordPolicy::LegacyPlaintext => Ok(password == stored),
            PasswordPolicy::Bcrypt { .. } if password.len() > BCRYPT_MAX_BYTES => Ok(false),
            PasswordPolicy::Bcrypt { .. } => {
                let password = password.to_string();
                let stored = stored.to_string();
                match tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored)).await? {
                    Ok(matches) => Ok(matches),
                    // A stored value that is not a bcrypt hash never matches
                    Err(bcrypt::BcryptError::InvalidHash(_))
                    | Err(bcrypt::BcryptError::InvalidPrefix(_))
                    | Err(bcrypt::BcryptError::InvalidCost(_))
                    | Err(bcrypt::BcryptError::InvalidBase64(_)) => Ok(false),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }
}

impl PasswordPolicy {
    /// Spend the work of one `verify` when there is no stored value to compare
    /// against, so a missing account costs as much as a wrong password.
    pub async fn verify_missing(&self, password: &str) -> Result<(), PasswordError> {
        match *self {
            PasswordPolicy::LegacyPlaintext => Ok(()),
            PasswordPolicy::Bcrypt { .. } => self.hash(password).await.map(|_| ()),
        }
    }
}
