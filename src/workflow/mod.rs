pub mod export_flow;
pub mod quiz_flow;
pub mod quiz_request;

pub use export_flow::{ExportFlow, ExportedFile};
pub use quiz_flow::QuizFlow;
pub use quiz_request::{ChatEditInput, CreateQuizInput};
