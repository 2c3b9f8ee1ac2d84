//! Prompt templates for the four document tasks.
//!
//! A [`TaskInput`] can only be built when the task's required inputs are
//! present, so template code never has to handle a missing query or second
//! document.

use crate::types::{Language, PromptPair, Task};

pub const QUERY_REQUIRED_FOR_EXTRACTION: &str = "Query required for extraction";
pub const QUERY_REQUIRED_FOR_QA: &str = "Query required for Q&A";
pub const SECOND_DOCUMENT_REQUIRED: &str = "Second document required for comparison";

/// Per-task inputs beyond the primary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskInput {
    Summarize,
    Extract { query: String },
    Compare { document_2: String },
    Qa { query: String },
}

/// A task precondition that was not met. Carries the reason reported to the
/// caller in `missing_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreconditionNotMet(pub &'static str);

impl TaskInput {
    /// Pair a task with its inputs. Empty strings count as absent.
    pub fn from_request(
        task: Task,
        document_2: Option<String>,
        query: Option<String>,
    ) -> Result<Self, PreconditionNotMet> {
        let query = query.filter(|q| !q.is_empty());
        let document_2 = document_2.filter(|d| !d.is_empty());

        match task {
            Task::Summarize => Ok(TaskInput::Summarize),
            Task::Extract => query
                .map(|query| TaskInput::Extract { query })
                .ok_or(PreconditionNotMet(QUERY_REQUIRED_FOR_EXTRACTION)),
            Task::Compare => document_2
                .map(|document_2| TaskInput::Compare { document_2 })
                .ok_or(PreconditionNotMet(SECOND_DOCUMENT_REQUIRED)),
            Task::Qa => query
                .map(|query| TaskInput::Qa { query })
                .ok_or(PreconditionNotMet(QUERY_REQUIRED_FOR_QA)),
        }
    }
}

/// Build the system/user prompt pair for `input` over `document_1`.
pub fn build_prompt(
    input: &TaskInput,
    language: Language,
    document_1: &str,
    system_prompt: &str,
) -> PromptPair {
    let directive = language.directive();

    let user = match input {
        TaskInput::Summarize => format!(
            "{directive}\n\n\
             Summarize the following government document. Focus on:\n\
             - Main purpose and subject\n\
             - Key decisions or directives\n\
             - Important dates and deadlines\n\
             - Stakeholders mentioned\n\
             - Action items\n\n\
             Document:\n{document_1}\n\n\
             If any information is missing or unclear, note it in your response.\n"
        ),
        TaskInput::Extract { query } => format!(
            "{directive}\n\n\
             Extract the following information from the document:\n{query}\n\n\
             Document:\n{document_1}\n\n\
             Provide structured, precise extraction. If information is not available, \
             state: \"Not available in provided document\".\n"
        ),
        TaskInput::Compare { document_2 } => format!(
            "{directive}\n\n\
             Compare these two government documents. Highlight:\n\
             - Key differences in content, decisions, or directives\n\
             - Common elements\n\
             - Timeline changes (if any)\n\
             - Policy modifications\n\
             - New additions or removals\n\n\
             Document 1:\n{document_1}\n\n\
             Document 2:\n{document_2}\n\n\
             Provide a structured comparison.\n"
        ),
        TaskInput::Qa { query } => format!(
            "{directive}\n\n\
             Based ONLY on the provided document, answer this question:\n{query}\n\n\
             Document:\n{document_1}\n\n\
             If the answer is not available in the document, respond: \
             \"Not available in provided document\".\n\
             Be precise and cite relevant parts of the document.\n"
        ),
    };

    PromptPair {
        system: system_prompt.to_string(),
        user,
    }
}
