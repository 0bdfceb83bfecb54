//! 音频格式代码模块
//!
//! libsndfile 的格式代码是一个位掩码：容器类型 | 编码子类型 | 字节序。
//! 这里集中定义常用常量和拆分/命名辅助函数。读取模式下格式由库填充，
//! 写入模式下由调用方组合，例如 `format::WAV | format::PCM_16`。

// ==================== 掩码 ====================

pub const SUBMASK: i32 = 0x0000_FFFF;
pub const TYPEMASK: i32 = 0x0FFF_0000;
pub const ENDMASK: i32 = 0x3000_0000;

// ==================== 容器类型 ====================

pub const WAV: i32 = 0x01_0000;
pub const AIFF: i32 = 0x02_0000;
pub const AU: i32 = 0x03_0000;
pub const RAW: i32 = 0x04_0000;
pub const PAF: i32 = 0x05_0000;
pub const SVX: i32 = 0x06_0000;
pub const NIST: i32 = 0x07_0000;
pub const VOC: i32 = 0x08_0000;
pub const IRCAM: i32 = 0x0A_0000;
pub const W64: i32 = 0x0B_0000;
pub const MAT4: i32 = 0x0C_0000;
pub const MAT5: i32 = 0x0D_0000;
pub const PVF: i32 = 0x0E_0000;
pub const XI: i32 = 0x0F_0000;
pub const HTK: i32 = 0x10_0000;
pub const SDS: i32 = 0x11_0000;
pub const AVR: i32 = 0x12_0000;
pub const WAVEX: i32 = 0x13_0000;
pub const SD2: i32 = 0x16_0000;
pub const FLAC: i32 = 0x17_0000;
pub const CAF: i32 = 0x18_0000;
pub const WVE: i32 = 0x19_0000;
pub const OGG: i32 = 0x20_0000;
pub const MPC2K: i32 = 0x21_0000;
pub const RF64: i32 = 0x22_0000;
pub const MPEG: i32 = 0x23_0000;

// ==================== 编码子类型 ====================

pub const PCM_S8: i32 = 0x0001;
pub const PCM_16: i32 = 0x0002;
pub const PCM_24: i32 = 0x0003;
pub const PCM_32: i32 = 0x0004;
pub const PCM_U8: i32 = 0x0005;
pub const FLOAT: i32 = 0x0006;
pub const DOUBLE: i32 = 0x0007;
pub const ULAW: i32 = 0x0010;
pub const ALAW: i32 = 0x0011;
pub const IMA_ADPCM: i32 = 0x0012;
pub const MS_ADPCM: i32 = 0x0013;
pub const GSM610: i32 = 0x0020;
pub const VOX_ADPCM: i32 = 0x0021;
pub const G721_32: i32 = 0x0030;
pub const G723_24: i32 = 0x0031;
pub const G723_40: i32 = 0x0032;
pub const DPCM_8: i32 = 0x0050;
pub const DPCM_16: i32 = 0x0051;
pub const VORBIS: i32 = 0x0060;
pub const OPUS: i32 = 0x0064;
pub const ALAC_16: i32 = 0x0070;
pub const ALAC_20: i32 = 0x0071;
pub const ALAC_24: i32 = 0x0072;
pub const ALAC_32: i32 = 0x0073;
pub const MPEG_LAYER_I: i32 = 0x0080;
pub const MPEG_LAYER_II: i32 = 0x0081;
pub const MPEG_LAYER_III: i32 = 0x0082;

// ==================== 字节序 ====================

pub const ENDIAN_FILE: i32 = 0x0000_0000;
pub const ENDIAN_LITTLE: i32 = 0x1000_0000;
pub const ENDIAN_BIG: i32 = 0x2000_0000;
pub const ENDIAN_CPU: i32 = 0x3000_0000;

/// 容器类型表：(代码, 名称)
const MAJOR_FORMATS: &[(i32, &str)] = &[
    (WAV, "WAV"),
    (AIFF, "AIFF"),
    (AU, "AU"),
    (RAW, "RAW"),
    (PAF, "PAF"),
    (SVX, "SVX"),
    (NIST, "NIST"),
    (VOC, "VOC"),
    (IRCAM, "IRCAM"),
    (W64, "W64"),
    (MAT4, "MAT4"),
    (MAT5, "MAT5"),
    (PVF, "PVF"),
    (XI, "XI"),
    (HTK, "HTK"),
    (SDS, "SDS"),
    (AVR, "AVR"),
    (WAVEX, "WAVEX"),
    (SD2, "SD2"),
    (FLAC, "FLAC"),
    (CAF, "CAF"),
    (WVE, "WVE"),
    (OGG, "OGG"),
    (MPC2K, "MPC2K"),
    (RF64, "RF64"),
    (MPEG, "MPEG"),
];

/// 编码子类型表：(代码, 名称)
const SUBTYPES: &[(i32, &str)] = &[
    (PCM_S8, "PCM_S8"),
    (PCM_16, "PCM_16"),
    (PCM_24, "PCM_24"),
    (PCM_32, "PCM_32"),
    (PCM_U8, "PCM_U8"),
    (FLOAT, "FLOAT"),
    (DOUBLE, "DOUBLE"),
    (ULAW, "ULAW"),
    (ALAW, "ALAW"),
    (IMA_ADPCM, "IMA_ADPCM"),
    (MS_ADPCM, "MS_ADPCM"),
    (GSM610, "GSM610"),
    (VOX_ADPCM, "VOX_ADPCM"),
    (G721_32, "G721_32"),
    (G723_24, "G723_24"),
    (G723_40, "G723_40"),
    (DPCM_8, "DPCM_8"),
    (DPCM_16, "DPCM_16"),
    (VORBIS, "VORBIS"),
    (OPUS, "OPUS"),
    (ALAC_16, "ALAC_16"),
    (ALAC_20, "ALAC_20"),
    (ALAC_24, "ALAC_24"),
    (ALAC_32, "ALAC_32"),
    (MPEG_LAYER_I, "MPEG_LAYER_I"),
    (MPEG_LAYER_II, "MPEG_LAYER_II"),
    (MPEG_LAYER_III, "MPEG_LAYER_III"),
];

/// 提取容器类型部分
#[inline]
pub fn major(code: i32) -> i32 {
    code & TYPEMASK
}

/// 提取编码子类型部分
#[inline]
pub fn subtype(code: i32) -> i32 {
    code & SUBMASK
}

/// 提取字节序部分
#[inline]
pub fn endian(code: i32) -> i32 {
    code & ENDMASK
}

/// 容器类型名称，未知类型返回 `None`
pub fn major_name(code: i32) -> Option<&'static str> {
    let major = major(code);
    MAJOR_FORMATS
        .iter()
        .find(|(c, _)| *c == major)
        .map(|(_, name)| *name)
}

/// 编码子类型名称，未知子类型返回 `None`
pub fn subtype_name(code: i32) -> Option<&'static str> {
    let sub = subtype(code);
    SUBTYPES.iter().find(|(c, _)| *c == sub).map(|(_, name)| *name)
}

/// 人类可读的格式描述，例如 `WAV/PCM_16`
pub fn describe(code: i32) -> String {
    let major = major_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("0x{:08X}", major(code)));
    let sub = subtype_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("0x{:04X}", subtype(code)));
    format!("{major}/{sub}")
}
