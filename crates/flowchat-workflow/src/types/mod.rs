pub mod events;

pub use events::{decode_frame, FrameError, FrameEvent};
