// LLM abstraction layer

pub mod provider;
pub mod openai;
pub mod unconfigured;

pub use provider::*;
