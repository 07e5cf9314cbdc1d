use crate::error::SheetError;

/// Pluggable token provider. Called before every API request.
///
/// Implementations handle token acquisition and caching. Returns
/// `Ok(None)` to skip the Authorization header (anonymous / API-key
/// access configured at the URL level).
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, SheetError>;
}

/// No authentication — anonymous requests.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, SheetError> {
        Ok(None)
    }
}

/// Static bearer token (already obtained externally).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, SheetError> {
        Ok(Some(self.0.clone()))
    }
}
