use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::error::GenerationError;

/// Upper bound on prompt plus reply tokens for local models.
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// Free-text continuation for messages the knowledge table can't answer.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Tokenizer plus causal language model.
///
/// `generate` returns the prompt tokens followed by the continuation, stopping
/// at `stop_token` or once `max_length` tokens are reached. It should check
/// `cancel` between tokens and bail out once it is set. `decode` drops
/// special tokens.
pub trait CausalLm: Send + Sync + 'static {
    fn eos_token(&self) -> &str;
    fn eos_token_id(&self) -> u32;
    fn encode(&self, text: &str) -> Result<Vec<u32>>;
    fn generate(
        &self,
        tokens: &[u32],
        max_length: usize,
        stop_token: u32,
        cancel: &AtomicBool,
    ) -> Result<Vec<u32>>;
    fn decode(&self, tokens: &[u32]) -> Result<String>;
}

pub struct CausalLmGenerator<M> {
    model: Arc<M>,
    max_length: usize,
}

impl<M: CausalLm> CausalLmGenerator<M> {
    pub fn new(model: Arc<M>) -> CausalLmGenerator<M> {
        CausalLmGenerator {
            model,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> CausalLmGenerator<M> {
        self.max_length = max_length;
        self
    }
}

/// Raises the flag when dropped, so a caller that stops waiting (timeout,
/// closed session) also stops the model.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

fn continue_prompt<M: CausalLm>(
    model: &M,
    prompt: &str,
    max_length: usize,
    cancel: &AtomicBool,
) -> Result<String> {
    let prompt = format!("{prompt}{}", model.eos_token());
    let input = model.encode(&prompt).context("Failed to encode prompt")?;
    let output = model
        .generate(&input, max_length, model.eos_token_id(), cancel)
        .context("Model generation failed")?;
    let reply = output.get(input.len()..).unwrap_or_default();
    model.decode(reply).context("Failed to decode reply")
}

#[async_trait]
impl<M: CausalLm> Generator for CausalLmGenerator<M> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let model = Arc::clone(&self.model);
        let prompt = prompt.to_string();
        let max_length = self.max_length;
        let cancel = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(Arc::clone(&cancel));

        let reply = tokio::task::spawn_blocking(move || {
            continue_prompt(&*model, &prompt, max_length, &cancel)
        })
        .await
        .context("Generation task aborted")??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }
        Ok(reply.to_string())
    }
}
