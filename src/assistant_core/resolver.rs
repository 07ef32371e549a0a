use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::{GenerationError, ResolveError};
use super::generator::Generator;
use super::knowledge::KnowledgeTable;
use super::types::{ConversationHistory, Message};

pub const FALLBACK_REPLY: &str = "I'm unable to generate a response right now. Please try again.";

const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Turns user messages into replies: knowledge table first, model second.
/// Shared by all sessions; holds no per-session state.
pub struct Resolver {
    knowledge: Arc<KnowledgeTable>,
    generator: Arc<dyn Generator>,
    generation_timeout: Duration,
}

impl Resolver {
    pub fn new(knowledge: Arc<KnowledgeTable>, generator: Arc<dyn Generator>) -> Resolver {
        Resolver {
            knowledge,
            generator,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Resolver {
        self.generation_timeout = timeout;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeTable {
        &self.knowledge
    }

    /// Appends the user message, as given, and exactly one reply to
    /// `history`. Blank or whitespace-only input is rejected and leaves
    /// `history` untouched.
    pub async fn resolve(
        &self,
        text: &str,
        history: &mut ConversationHistory,
    ) -> Result<String, ResolveError> {
        if text.trim().is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        history.push(Message::user(text));
        let reply = self.respond(text).await;
        history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    pub async fn respond(&self, text: &str) -> String {
        if let Some(entry) = self.knowledge.lookup_entry(text) {
            debug!(keyword = entry.keyword(), "answered from knowledge table");
            return entry.answer().render();
        }

        info!("no keyword matched, asking the model");
        match self.generate_bounded(text).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("generation failed: {err}");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn generate_bounded(&self, text: &str) -> Result<String, GenerationError> {
        tokio::time::timeout(self.generation_timeout, self.generator.generate(text))
            .await
            .map_err(|_| GenerationError::Timeout(self.generation_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::assistant_core::types::Role;

    #[derive(Default)]
    struct ScriptedGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("model says: {prompt}"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Backend(anyhow!("out of memory")))
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl Generator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".into())
        }
    }

    fn resolver_with(generator: Arc<dyn Generator>) -> Resolver {
        Resolver::new(KnowledgeTable::builtin(), generator)
    }

    #[tokio::test]
    async fn test_knowledge_hit_skips_model() {
        let generator = Arc::new(ScriptedGenerator::default());
        let resolver = resolver_with(generator.clone());
        let mut history = ConversationHistory::new();

        let reply = resolver.resolve("I have a fever", &mut history).await.unwrap();

        assert!(reply.contains("Cause:") && reply.contains("Vaccine:"));
        assert!(generator.prompts.lock().unwrap().is_empty());
        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0], Message::user("I have a fever"));
        assert_eq!(history.messages()[1], Message::assistant(reply));
    }

    #[tokio::test]
    async fn test_miss_delegates_to_model() {
        let generator = Arc::new(ScriptedGenerator::default());
        let resolver = resolver_with(generator.clone());
        let mut history = ConversationHistory::new();

        let reply = resolver
            .resolve("tell me about xyz123", &mut history)
            .await
            .unwrap();

        assert_eq!(reply, "model says: tell me about xyz123");
        assert_eq!(*generator.prompts.lock().unwrap(), vec!["tell me about xyz123"]);
        assert_eq!(history.last().unwrap().content, reply);
    }

    #[tokio::test]
    async fn test_history_grows_by_two_per_message() {
        let resolver = resolver_with(Arc::new(ScriptedGenerator::default()));
        let mut history = ConversationHistory::new();

        let inputs = ["good morning doctor", "what is xyz123", "any tips for asthma?"];
        for (turn, input) in inputs.iter().enumerate() {
            resolver.resolve(input, &mut history).await.unwrap();
            assert_eq!(history.len(), (turn + 1) * 2);
        }

        let roles: Vec<Role> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [Role::User, Role::Assistant].repeat(inputs.len())
        );
        assert_eq!(history.messages()[2].content, "what is xyz123");
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected() {
        let generator = Arc::new(ScriptedGenerator::default());
        let resolver = resolver_with(generator.clone());
        let mut history = ConversationHistory::new();

        for input in ["", "   ", "\n\t"] {
            let err = resolver.resolve(input, &mut history).await.unwrap_err();
            assert_eq!(err, ResolveError::EmptyInput);
        }
        assert!(history.is_empty());
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_text_is_stored_as_given() {
        let generator = Arc::new(ScriptedGenerator::default());
        let resolver = resolver_with(generator.clone());
        let mut history = ConversationHistory::new();

        resolver.resolve("  I have a Fever\n", &mut history).await.unwrap();
        resolver.resolve(" what is xyz123 ", &mut history).await.unwrap();

        assert_eq!(history.messages()[0], Message::user("  I have a Fever\n"));
        assert!(history.messages()[1].content.contains("Cause:"));
        assert_eq!(history.messages()[2], Message::user(" what is xyz123 "));
        assert_eq!(*generator.prompts.lock().unwrap(), vec![" what is xyz123 "]);
    }

    #[tokio::test]
    async fn test_turns_resolved_apart_append_in_order() {
        let resolver = resolver_with(Arc::new(ScriptedGenerator::default()));
        let mut history = ConversationHistory::new();

        let mut first = ConversationHistory::new();
        let mut second = ConversationHistory::new();
        resolver.resolve("good morning", &mut first).await.unwrap();
        resolver.resolve("what is xyz123", &mut second).await.unwrap();
        history.append(first);
        history.append(second);

        assert_eq!(history.len(), 4);
        assert_eq!(history.messages()[0].content, "good morning");
        assert_eq!(history.messages()[2].content, "what is xyz123");
        assert_eq!(history.messages()[3].content, "model says: what is xyz123");
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let resolver = resolver_with(Arc::new(FailingGenerator));
        let mut history = ConversationHistory::new();

        let reply = resolver.resolve("what is xyz123", &mut history).await.unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_slow_model_times_out() {
        let resolver = resolver_with(Arc::new(SlowGenerator))
            .with_generation_timeout(Duration::from_millis(20));
        let mut history = ConversationHistory::new();

        let reply = resolver.resolve("what is xyz123", &mut history).await.unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_respond_leaves_no_trace() {
        let resolver = resolver_with(Arc::new(ScriptedGenerator::default()));
        let greeting = resolver.respond("Good Night").await;
        assert!(greeting.starts_with("Good night!"));
        assert_eq!(resolver.knowledge().len(), 15);
    }
}
