mod render_sink;
mod session_rng;

pub mod snake;

pub use render_sink::RenderSink;
pub use session_rng::SessionRng;
