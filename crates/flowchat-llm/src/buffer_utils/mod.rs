mod buffering;
mod sse_parser;

pub use buffering::CircularLineBuffer;
pub use sse_parser::{SseFrame, SseFrameParser, DEFAULT_EVENT, DONE_MARKER};
