//! # trove_watermark 库
//!
//! 本库包含 Trove 不可见水印的核心逻辑：在红色通道最低有效位中嵌入和提取标识符。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;
pub mod watermark;

pub use error::WatermarkError;
pub use watermark::{Watermark, decode, encode};
