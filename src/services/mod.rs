pub mod file_watcher;
pub mod image_loader;
pub mod renderer;
pub mod worker;

pub use file_watcher::{FileChangeEvent, FileWatcher};
pub use image_loader::{decode_png_bytes, load_png};
pub use renderer::RenderService;
pub use worker::{DitherRequest, DitherResponse, DitherWorker, LatestRequest};
