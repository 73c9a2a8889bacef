//! Chat backend implementations.

mod openai;

pub use openai::OpenAIBackend;
