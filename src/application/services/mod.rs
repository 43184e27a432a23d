mod ask_service;

pub use ask_service::{AskError, AskOutcome, AskService, build_messages};
