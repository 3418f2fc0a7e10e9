use crate::constants::{CHANNELS, RED_CHANNEL};
use crate::error::WatermarkError;

/// 缓冲区中完整 RGBA 像素的个数。
pub fn pixel_count(pix: &[u8]) -> usize {
    pix.len() / CHANNELS
}

fn check_region(pix: &[u8], start: usize, width: usize) -> Result<(), WatermarkError> {
    if width > 64 {
        return Err(WatermarkError::BitWidthTooLarge(width));
    }

    let pixels = pixel_count(pix);
    if start.checked_add(width).is_none_or(|end| end > pixels) {
        return Err(WatermarkError::RegionOutOfBounds {
            start,
            width,
            pixels,
        });
    }

    Ok(())
}

/// 将 `value` 的低 `width` 位按高位在前的顺序，写入从 `start` 开始的连续像素的红色通道最低位。
pub fn modify(value: u64, width: usize, pix: &mut [u8], start: usize) -> Result<(), WatermarkError> {
    check_region(pix, start, width)?;

    let sub_pix = &mut pix[start * CHANNELS..(start + width) * CHANNELS];

    for (i, pixel) in sub_pix.chunks_exact_mut(CHANNELS).enumerate() {
        let bit = ((value >> (width - 1 - i)) & 1) as u8;
        pixel[RED_CHANNEL] = (pixel[RED_CHANNEL] & 0xFE) | bit;
    }

    Ok(())
}

/// 从 `start` 开始的 `width` 个像素的红色通道最低位中读出一个值，高位在前。
pub fn recover(pix: &[u8], start: usize, width: usize) -> Result<u64, WatermarkError> {
    check_region(pix, start, width)?;

    let sub_pix = &pix[start * CHANNELS..(start + width) * CHANNELS];

    Ok(sub_pix
        .chunks_exact(CHANNELS)
        .fold(0u64, |acc, pixel| (acc << 1) | (pixel[RED_CHANNEL] & 1) as u64))
}
