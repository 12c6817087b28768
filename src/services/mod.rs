pub mod conversation_store;
pub mod docx_writer;
pub mod llm_service;
pub mod prompt_builder;

pub use conversation_store::ConversationStore;
pub use docx_writer::DocxWriter;
pub use llm_service::{ChatBackend, LlmService};
