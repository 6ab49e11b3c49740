mod console_sink;
mod key_reader;
mod menu;
mod snake_runner;

pub use console_sink::ConsoleRenderSink;
pub use key_reader::spawn_stdin_reader;
pub use menu::{discard_pending_input, next_match};
pub use snake_runner::{run_snake_game, RunOptions};
