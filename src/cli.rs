//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_NAMESPACE;
use clap::Parser;
use std::path::PathBuf;

/// 为 Trove 文档照片嵌入或提取不可见水印 (红色通道 LSB) 的命令行工具。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "为 Trove 文档照片嵌入或提取不可见水印。标识符被写入红色通道的最低有效位，输出必须保存为无损格式 (如 PNG)。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入)、extract (提取) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将标识符 (如铭刻交易 ID) 嵌入到图像中。
    Embed(EmbedArgs),

    /// 从加过水印的图像中提取标识符。
    Extract(ExtractArgs),

    /// 显示图像最多能容纳的标识符长度。
    Capacity(CapacityArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要嵌入的标识符。
    #[arg(long)]
    pub id: String,

    /// 输出图像路径。默认为输入文件旁的 `watermarked_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 命名空间前缀，编码端与解码端必须一致。
    #[arg(short, long, env = "TROVE_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 加过水印的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 将标识符另存到该文本文件。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    #[arg(short, long, env = "TROVE_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    #[arg(short, long)]
    pub image: PathBuf,

    #[arg(short, long, env = "TROVE_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}
