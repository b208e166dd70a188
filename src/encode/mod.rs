pub mod export;
pub mod ffmpeg;
pub mod gif;
pub mod sink;
