//! 样本缓冲区处理模块
//!
//! 定宽整数样本与字节流之间的转换，供音频输出和序列化使用。

pub mod sample_conversion;

pub use sample_conversion::{ByteOrder, i16_to_bytes, i16_to_bytes_be, i16_to_bytes_le};
