//! 音频样本字节序转换
//!
//! 把交错的16位有符号样本展开成字节流，每个样本占2字节，
//! 按指定字节序写出。纯函数，除输出缓冲区外不做其他分配。

/// 字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// 小端（OpenAL / WAV 使用）
    Little,
    /// 大端（AIFF 等使用）
    Big,
}

/// 按指定字节序转换
pub fn i16_to_bytes(samples: &[i16], order: ByteOrder) -> Vec<u8> {
    match order {
        ByteOrder::Little => i16_to_bytes_le(samples),
        ByteOrder::Big => i16_to_bytes_be(samples),
    }
}

/// 小端转换：`[s0_lo, s0_hi, s1_lo, s1_hi, ...]`
pub fn i16_to_bytes_le(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// 大端转换：`[s0_hi, s0_lo, s1_hi, s1_lo, ...]`
pub fn i16_to_bytes_be(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_be_bytes());
    }
    bytes
}
