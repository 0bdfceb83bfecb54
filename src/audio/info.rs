//! 音频文件描述信息
//!
//! [`Info`] 是 `SF_INFO` 的公开镜像。与原生结构之间只通过
//! [`Info::to_native`] / [`Info::from_native`] 这一对显式转换函数交互，
//! 结构布局依赖被限制在此文件与 `ffi.rs` 中。

use std::time::Duration;

use serde::Serialize;

use crate::ffi;

/// 音频文件描述信息
///
/// 读取模式下由打开操作填充；写入模式下由调用方预先填写期望的输出格式。
/// 本类型不做任何校验，非法参数只会在打开时被原生库拒绝。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Info {
    /// 总帧数
    pub frames: u64,
    /// 采样率 (Hz)
    pub sample_rate: i32,
    /// 声道数
    pub channels: i32,
    /// 格式代码（容器 | 编码 | 字节序），见 [`crate::audio::format`]
    pub format: i32,
    /// 段数
    pub sections: i32,
    /// 是否支持随机定位
    pub seekable: bool,
}

impl Info {
    /// 写入模式用的描述：帧数/段数由库决定，这里置0
    pub fn for_write(sample_rate: i32, channels: i32, format: i32) -> Self {
        Self {
            frames: 0,
            sample_rate,
            channels,
            format,
            sections: 0,
            seekable: false,
        }
    }

    /// 从原生结构构造
    pub fn from_native(raw: &ffi::SF_INFO) -> Self {
        let mut info = Self::default();
        info.fill_from_native(raw);
        info
    }

    /// 从原生结构复制全部字段；seekable 非0即真
    ///
    /// 负的帧数（原生库不会产生）按0处理。
    pub fn fill_from_native(&mut self, raw: &ffi::SF_INFO) {
        self.frames = u64::try_from(raw.frames).unwrap_or(0);
        self.sample_rate = raw.samplerate;
        self.channels = raw.channels;
        self.format = raw.format;
        self.sections = raw.sections;
        self.seekable = raw.seekable != 0;
    }

    /// 转换为原生结构；seekable 写为 1/0
    ///
    /// 超出 `i64` 范围的帧数饱和到 `i64::MAX`。
    pub fn to_native(&self) -> ffi::SF_INFO {
        ffi::SF_INFO {
            frames: i64::try_from(self.frames).unwrap_or(i64::MAX),
            samplerate: self.sample_rate,
            channels: self.channels,
            format: self.format,
            sections: self.sections,
            seekable: i32::from(self.seekable),
        }
    }

    /// 持续时长（秒），采样率非正时为0
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate <= 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }

    /// 持续时长
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds())
    }

    /// 声道数（usize类型），非正值按0处理
    ///
    /// 用于缓冲区尺寸计算，避免重复的类型转换
    pub fn channels_usize(&self) -> usize {
        usize::try_from(self.channels).unwrap_or(0)
    }

    /// `frames` 帧对应的交错样本数，超出 `usize` 范围时返回 `None`
    pub fn samples_for(&self, frames: u64) -> Option<usize> {
        usize::try_from(frames)
            .ok()?
            .checked_mul(self.channels_usize())
    }

    /// 由原生库检查格式组合是否合法（写入前可用）
    pub fn is_format_valid(&self) -> bool {
        let raw = self.to_native();
        // SAFETY: raw 是有效的栈上 SF_INFO，库只读取它
        unsafe { ffi::sf_format_check(&raw) != 0 }
    }
}
