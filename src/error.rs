//! # 错误类型模块
//!
//! 水印编解码过程中可能出现的所有错误。
//! 编码端的错误会直接返回给调用者；解码端的错误只在 [`Watermark::try_decode`]
//! 中可见，[`Watermark::decode`] 会将它们统一视为 "未找到水印"。
//!
//! [`Watermark::try_decode`]: crate::watermark::Watermark::try_decode
//! [`Watermark::decode`]: crate::watermark::Watermark::decode

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatermarkError {
    /// 标识符 (连同命名空间和长度头) 超出了图像的可用容量。
    #[error("payload too large: {required} bits required, only {available} available")]
    PayloadTooLarge { required: usize, available: usize },

    /// 读写区域超出了像素数据边界。
    #[error("region of {width} bits at pixel {start} exceeds image of {pixels} pixels")]
    RegionOutOfBounds {
        start: usize,
        width: usize,
        pixels: usize,
    },

    /// 单次读写的位数超过了 64。
    #[error("bit width {0} exceeds maximum of 64")]
    BitWidthTooLarge(usize),

    /// 图像像素数不足以容纳长度头。
    #[error("image of {pixels} pixels is too small to carry a length header")]
    ImageTooSmall { pixels: usize },

    /// 长度头声明的位数超过了图像剩余的像素数。
    #[error("length header declares {declared} bits, only {available} available")]
    MalformedHeader { declared: usize, available: usize },

    /// 恢复出的消息不以命名空间前缀开头。
    #[error("message does not start with the expected namespace")]
    NamespaceMismatch,

    /// 去掉前缀后的标识符不是合法的 UTF-8。
    #[error("recovered identifier is not valid UTF-8")]
    InvalidUtf8,
}
