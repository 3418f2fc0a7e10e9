/// 每个像素的通道数 (R, G, B, A)。
pub const CHANNELS: usize = 4;

/// 承载水印的通道在像素内的偏移量。只使用红色通道的最低有效位。
pub const RED_CHANNEL: usize = 0;

/// 长度头占用的位数。
/// 长度头以大端序保存消息的 **位** 数 (不是字节数)，
/// 每个像素存储 1 bit，因此需要 16 个像素来隐藏长度。
pub const LENGTH_HEADER_BITS: usize = 16;

/// 消息中单个字节占用的位数 (即像素数)。
pub const BITS_PER_CHAR: usize = 8;

/// 长度头能够表示的最大消息位数。
pub const MAX_MESSAGE_BITS: usize = u16::MAX as usize;

/// 默认的命名空间前缀。
/// 解码时以此区分 Trove 水印与任意未加水印的图像，必须与编码端保持一致。
pub const DEFAULT_NAMESPACE: &str = "TROVE:";

/// 未指定输出路径时，加水印后图像文件名的前缀。
pub const WATERMARKED_PREFIX: &str = "watermarked_";

