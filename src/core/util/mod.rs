pub mod prompt;
pub mod retry;
