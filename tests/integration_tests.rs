use image::{ImageBuffer, Rgba};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use trove_watermark::{
    cli::{CapacityArgs, EmbedArgs, ExtractArgs},
    handler::{handle_capacity, handle_embed, handle_extract},
};

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn embed_args(image: &Path, id: &str, dest: Option<&Path>, force: bool) -> EmbedArgs {
    EmbedArgs {
        image: image.to_path_buf(),
        id: id.to_string(),
        dest: dest.map(Path::to_path_buf),
        force,
        namespace: "TROVE:".to_string(),
    }
}

/// 验证从嵌入到提取的完整流程
#[test]
fn test_handle_embed_and_extract_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let watermarked_image_path = dir.path().join("watermarked.png");
    let extracted_text_path = dir.path().join("txid.txt");

    create_test_image(&original_image_path, 100, 100);
    let txid = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    // 2. 测试 handle_embed
    handle_embed(embed_args(
        &original_image_path,
        txid,
        Some(&watermarked_image_path),
        false,
    ))?;
    assert!(
        watermarked_image_path.exists(),
        "Watermarked image should be created."
    );

    // 3. 测试 handle_extract
    let extract_args = ExtractArgs {
        image: watermarked_image_path.clone(),
        text: Some(extracted_text_path.clone()),
        force: false,
        namespace: "TROVE:".to_string(),
    };
    let extracted = handle_extract(extract_args)?;

    // 4. 验证结果
    assert_eq!(extracted, txid);
    assert_eq!(fs::read_to_string(&extracted_text_path)?, txid);

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_embed_with_default_dest() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("scan.bmp");
    create_test_image(&original_image_path, 40, 40);

    handle_embed(embed_args(&original_image_path, "inscription-7", None, false))?;

    // 默认输出总是 PNG
    let expected_path = dir.path().join("watermarked_scan.png");
    assert!(
        expected_path.exists(),
        "Default watermarked image should be created at: {:?}",
        expected_path
    );

    let extracted = handle_extract(ExtractArgs {
        image: expected_path,
        text: None,
        force: false,
        namespace: "TROVE:".to_string(),
    })?;
    assert_eq!(extracted, "inscription-7");

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;

    let result = handle_embed(embed_args(&image_path, "abc", Some(&dest_path), false));
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let result = handle_embed(embed_args(&image_path, "abc", Some(&dest_path), true));
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_embed_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let dest_path = dir.path().join("dest.png");

    // 100 个像素最多容纳 16 + 84 bits
    create_test_image(&image_path, 10, 10);

    let result = handle_embed(embed_args(&image_path, "a-rather-long-txid", Some(&dest_path), false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists(), "Nothing should be written on failure.");

    Ok(())
}

/// 验证未加水印的图像会报告找不到水印
#[test]
fn test_handle_extract_without_watermark() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("plain.png");
    ImageBuffer::from_pixel(20, 20, Rgba([0u8, 0, 0, 255])).save(&image_path)?;

    let result = handle_extract(ExtractArgs {
        image: image_path,
        text: None,
        force: false,
        namespace: "TROVE:".to_string(),
    });

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("No Trove watermark found"));
    }

    Ok(())
}

#[test]
fn test_handle_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 10, 10);

    // (100 - 16) / 8 - "APP:".len()
    let capacity = handle_capacity(CapacityArgs {
        image: image_path,
        namespace: "APP:".to_string(),
    })?;
    assert_eq!(capacity, 6);

    Ok(())
}

/// 验证拒绝将结果保存为有损格式
#[test]
fn test_handle_embed_rejects_jpeg_dest() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.jpg");
    create_test_image(&image_path, 30, 30);

    let result = handle_embed(embed_args(&image_path, "abc", Some(&dest_path), true));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Refusing to save"));
    }
    assert!(!dest_path.exists());

    Ok(())
}
