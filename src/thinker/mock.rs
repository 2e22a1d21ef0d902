use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Thinker;
use crate::auth::Credential;
use crate::error::{EvalError, Result};

/// A scripted thinker for tests. Returns pre-defined replies in order and
/// records what it was asked.
pub struct MockThinker {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    tokens: Mutex<Vec<String>>,
}

impl MockThinker {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a script of successful text replies.
    pub fn replying<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.to_string())).collect())
    }

    /// Number of completion requests made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Every bearer token received, in order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl Thinker for MockThinker {
    fn model(&self) -> &str {
        "mock"
    }

    async fn complete(&self, credential: &Credential, prompt: &str) -> Result<String> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.tokens
            .lock()
            .unwrap()
            .push(credential.expose().to_string());

        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(EvalError::CompletionSchema(format!(
                "MockThinker: no more replies (called {} times)",
                i + 1
            )))
        })
    }
}
