//! 音频输出模块（OpenAL）
//!
//! 仅供示例播放器使用，需启用 `playback` 特性。设备生命周期显式管理：
//! [`AudioDevice::open_default`] 打开设备并激活上下文，声源和缓冲区借用设备，
//! 全部通过 `Drop` 释放。

mod device;
mod openal;

pub use device::{AudioDevice, Buffer, BufferFormat, Source, SourceState};
