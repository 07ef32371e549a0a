mod error;
mod generator;
mod knowledge;
mod openai;
mod resolver;
mod types;

pub use error::{GenerationError, KnowledgeError, ResolveError};
pub use generator::{CausalLm, CausalLmGenerator, Generator, DEFAULT_MAX_LENGTH};
pub use knowledge::{Answer, KnowledgeEntry, KnowledgeTable};
pub use openai::OpenAiGenerator;
pub use resolver::{Resolver, FALLBACK_REPLY};
pub use types::{ConversationHistory, Message, Role};
