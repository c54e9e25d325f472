use crate::types::TokenPair;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("failed to persist tokens: {reason}")]
    Persist { reason: String },
}

/// Injected key-value persistence for the access/refresh token pair.
///
/// Readers must always observe the latest stored value; the refresh routine
/// and login/register/logout are the only writers. The trait exists so the
/// controllers can be exercised against an in-memory fake.
pub trait TokenStore: Send + Sync {
    /// Current access token, if any.
    fn access(&self) -> Option<String>;

    /// Current refresh token, if any.
    fn refresh(&self) -> Option<String>;

    /// Store the populated slots of `tokens`, leaving empty slots untouched.
    fn store(&self, tokens: &TokenPair) -> Result<(), TokenStoreError>;

    /// Remove both tokens.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// In-memory token store for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    state: Mutex<TokenPair>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            state: Mutex::new(TokenPair::new(access, refresh)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn access(&self) -> Option<String> {
        self.state.lock().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.state.lock().refresh.clone()
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        let mut state = self.state.lock();
        if let Some(access) = &tokens.access {
            state.access = Some(access.clone());
        }
        if let Some(refresh) = &tokens.refresh {
            state.refresh = Some(refresh.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.state.lock() = TokenPair::default();
        Ok(())
    }
}
