//! # 命令处理逻辑模块
//!
//! 包含处理 `embed`、`extract` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用水印编解码器以及向用户报告结果。

use crate::cli::{CapacityArgs, EmbedArgs, ExtractArgs};
use crate::constants::WATERMARKED_PREFIX;
use crate::error::WatermarkError;
use crate::watermark::Watermark;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(picture.to_rgba8())
}

/// 目标文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}\nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 水印只存在于最低有效位，输出不能是有损格式。
fn ensure_lossless(path: &Path) -> Result<()> {
    anyhow::ensure!(
        !matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg)),
        "Refusing to save a watermarked image as JPEG: {}\nLossy compression destroys the watermark, use PNG instead.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 默认输出路径：输入文件所在目录下的 `watermarked_<文件名>.png`。
/// 始终使用 PNG，有损格式会破坏最低有效位。
fn default_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{WATERMARKED_PREFIX}{stem}.png"))
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// 负责读取图像、嵌入标识符，并将结果写入目标图像文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`，或目标是有损格式。
/// * 图像没有足够的空间容纳标识符。
/// * 无法写入到目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let dest = args.dest.unwrap_or_else(|| default_dest(&args.image));
    ensure_lossless(&dest)?;
    ensure_writable(&dest, args.force)?;

    let picture = load_rgba(&args.image)?;
    let watermark = Watermark::new(args.namespace);

    let encoded = watermark.encode(&picture, &args.id).map_err(|e| match e {
        WatermarkError::PayloadTooLarge {
            required,
            available,
        } => anyhow::anyhow!(
            "Not enough space in the image to embed the identifier. \nRequired: {} bits, Available: {} bits (at most {} identifier bytes)",
            required.to_string().red().bold(),
            available.to_string().green().bold(),
            watermark.capacity(&picture).to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("Failed to embed the watermark."),
    })?;

    encoded.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The identifier has been successfully embedded and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 读取图像并提取标识符，打印到标准输出；如果指定了 `--text`，同时写入该文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有使用该命名空间的水印。
/// * 无法写入到目标文本文件。
pub fn handle_extract(args: ExtractArgs) -> Result<String> {
    if let Some(text) = &args.text {
        ensure_writable(text, args.force)?;
    }

    let picture = load_rgba(&args.image)?;
    let watermark = Watermark::new(args.namespace);

    let identifier = watermark.try_decode(&picture).with_context(|| {
        format!(
            "No Trove watermark found in '{}' (namespace {}).",
            args.image.to_string_lossy().red().bold(),
            watermark.namespace().red()
        )
    })?;

    if let Some(text) = &args.text {
        fs::write(text, &identifier).with_context(|| {
            format!(
                "Unable to write to target text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?;
        println!(
            "The identifier has been successfully extracted and saved: {}",
            text.to_string_lossy().green().bold()
        );
    }

    println!("{}", identifier.green().bold());
    Ok(identifier)
}

/// 处理 'Capacity' 命令：报告图像能容纳的标识符最大字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<usize> {
    let picture = load_rgba(&args.image)?;
    let capacity = Watermark::new(args.namespace).capacity(&picture);

    println!(
        "{} ({}x{}) can carry an identifier of up to {} bytes.",
        args.image.to_string_lossy().green().bold(),
        picture.width(),
        picture.height(),
        capacity.to_string().green().bold()
    );

    Ok(capacity)
}
