// Document Intelligence Agent - document summarisation, extraction, comparison and Q&A over an LLM

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod documents;
pub mod llm;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use agents::DocumentAgent;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}

/// Wire the agent and its gateway from a loaded configuration.
pub fn build_agent(config: &Config) -> DocumentAgent {
    let llm = llm::LLM::from_config(&config.llm);
    DocumentAgent::new(config.agent.clone(), llm)
}
