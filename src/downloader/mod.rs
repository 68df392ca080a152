//! Progress checkpoints and saving of downloaded files

pub mod progress;
pub mod saver;

pub use progress::{Checkpoint, PROGRESS_HIDE_DELAY};
pub use saver::save_download;
