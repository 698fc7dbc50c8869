pub mod canvas;
pub mod export;

pub use canvas::{canvas_size, CanvasRenderer, CanvasStyle, CHAR_WIDTH_RATIO};
pub use export::{encode_png, to_json, to_text, ResultDocument};
