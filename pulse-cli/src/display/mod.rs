pub mod progress;

pub use progress::{BatchProgress, ProgressWriterFactory};
