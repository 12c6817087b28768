pub mod level;
pub mod message;
pub mod quiz_meta;
pub mod quiz_type;

pub use level::Level;
pub use message::{Message, Role};
pub use quiz_meta::{extract_header_meta, infer_question_count, QuizMeta};
pub use quiz_type::QuizType;
