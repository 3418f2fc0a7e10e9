//! # 水印编解码模块
//!
//! 将一个简短的标识符 (在 Trove 中是铭刻交易 ID) 写入图像红色通道的最低有效位，
//! 并能从图像中重新恢复出来。
//!
//! 位流布局：
//!
//! ```text
//! | 长度头: 16 bit, 大端序, 消息位数 | 消息: namespace + identifier, 每字节高位在前 |
//! ```
//!
//! 每个像素承载 1 bit，按行优先顺序从第一个像素开始。其它通道与位流之后的像素保持不变。

use crate::constants::{BITS_PER_CHAR, DEFAULT_NAMESPACE, LENGTH_HEADER_BITS, MAX_MESSAGE_BITS};
use crate::error::WatermarkError;
use crate::steganography::{modify, pixel_count, recover};
use image::RgbaImage;

/// 带命名空间前缀的水印编解码器。
///
/// 编码端与解码端必须使用相同的命名空间，否则解码总是返回 `None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    namespace: String,
}

impl Default for Watermark {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Watermark {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 图像在当前命名空间下能容纳的标识符最大字节数。
    pub fn capacity(&self, image: &RgbaImage) -> usize {
        let message_bits = pixel_count(image.as_raw())
            .saturating_sub(LENGTH_HEADER_BITS)
            .min(MAX_MESSAGE_BITS);
        (message_bits / BITS_PER_CHAR).saturating_sub(self.namespace.len())
    }

    /// 返回嵌入了 `identifier` 的新图像，原图像不受影响。
    ///
    /// # Errors
    ///
    /// 当长度头加消息所需的位数超过图像像素数，或消息位数超出长度头的表示范围时，
    /// 返回 [`WatermarkError::PayloadTooLarge`]。不会截断消息。
    pub fn encode(&self, image: &RgbaImage, identifier: &str) -> Result<RgbaImage, WatermarkError> {
        let message: Vec<u8> = self
            .namespace
            .bytes()
            .chain(identifier.bytes())
            .collect();
        let message_bits = message.len() * BITS_PER_CHAR;
        let required = LENGTH_HEADER_BITS + message_bits;
        let pixels = pixel_count(image.as_raw());

        if message_bits > MAX_MESSAGE_BITS || required > pixels {
            return Err(WatermarkError::PayloadTooLarge {
                required,
                available: pixels.min(LENGTH_HEADER_BITS + MAX_MESSAGE_BITS),
            });
        }

        let mut encoded = image.clone();
        let pix: &mut [u8] = &mut encoded;

        modify(message_bits as u64, LENGTH_HEADER_BITS, pix, 0)?;
        message.iter().enumerate().try_for_each(|(i, &byte)| {
            let start = LENGTH_HEADER_BITS + BITS_PER_CHAR * i;
            modify(byte as u64, BITS_PER_CHAR, pix, start)
        })?;

        Ok(encoded)
    }

    /// 尝试从图像中恢复标识符，找不到时返回 `None`。
    ///
    /// 未加过水印的图像偶尔可能恰好以命名空间前缀开头，从而得到误报；
    /// 没有校验和，这是已知且接受的限制。
    pub fn decode(&self, image: &RgbaImage) -> Option<String> {
        self.try_decode(image).ok()
    }

    /// 与 [`Watermark::decode`] 相同，但在找不到水印时给出原因。
    pub fn try_decode(&self, image: &RgbaImage) -> Result<String, WatermarkError> {
        let pix = image.as_raw();
        let pixels = pixel_count(pix);

        if pixels < LENGTH_HEADER_BITS {
            return Err(WatermarkError::ImageTooSmall { pixels });
        }

        let declared = recover(pix, 0, LENGTH_HEADER_BITS)? as usize;
        let available = pixels - LENGTH_HEADER_BITS;
        if declared > available {
            return Err(WatermarkError::MalformedHeader {
                declared,
                available,
            });
        }

        // 不足一个字节的尾部位被丢弃
        let message = (0..declared / BITS_PER_CHAR)
            .map(|i| {
                let start = LENGTH_HEADER_BITS + BITS_PER_CHAR * i;
                recover(pix, start, BITS_PER_CHAR).map(|value| value as u8)
            })
            .collect::<Result<Vec<u8>, WatermarkError>>()?;

        let identifier = message
            .strip_prefix(self.namespace.as_bytes())
            .ok_or(WatermarkError::NamespaceMismatch)?;

        String::from_utf8(identifier.to_vec()).map_err(|_| WatermarkError::InvalidUtf8)
    }
}

/// 使用默认命名空间 (`TROVE:`) 嵌入标识符。
pub fn encode(image: &RgbaImage, identifier: &str) -> Result<RgbaImage, WatermarkError> {
    Watermark::default().encode(image, identifier)
}

/// 使用默认命名空间 (`TROVE:`) 提取标识符。
pub fn decode(image: &RgbaImage) -> Option<String> {
    Watermark::default().decode(image)
}
