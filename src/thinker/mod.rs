pub mod mock;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::Credential;
use crate::error::Result;

/// The borrowed brain: something that turns a prompt into raw model text.
///
/// Implementations only transport and unwrap; the reply is validated by
/// [`sanitize`](crate::sanitize).
#[async_trait]
pub trait Thinker: Send + Sync {
    /// Model identifier, for display.
    fn model(&self) -> &str;

    /// Send `prompt` authenticated with `credential` and return the model's
    /// text output.
    async fn complete(&self, credential: &Credential, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: Thinker + ?Sized> Thinker for Arc<T> {
    fn model(&self) -> &str {
        (**self).model()
    }

    async fn complete(&self, credential: &Credential, prompt: &str) -> Result<String> {
        (**self).complete(credential, prompt).await
    }
}
