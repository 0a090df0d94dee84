pub mod app;

pub use app::{multi_select, SelectPrompt};
