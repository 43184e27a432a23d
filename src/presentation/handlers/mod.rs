mod ask;
mod health;

pub use ask::ask_handler;
pub use health::{greeting_handler, health_handler};
