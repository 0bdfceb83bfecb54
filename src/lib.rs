//! libsndfile 安全绑定
//!
//! 对原生声音文件库的薄封装：打开、读取、写入并描述多种容器/编码格式的音频文件。
//! 编解码本身全部由 libsndfile 完成，本 crate 只负责：
//!
//! ## 核心职责
//! - `SF_INFO` 结构布局镜像与显式转换（[`Info`]）
//! - 原生句柄生命周期管理，`Drop` 兜底释放（[`SndFile`]）
//! - 原生错误字符串的封送（[`SndError`]）
//! - 16位样本缓冲区到字节流的转换（[`processing`]）
//!
//! 启用 `playback` 特性后额外提供最小的 OpenAL 输出封装，供示例播放器使用。

pub mod audio;
pub mod error;
pub mod ffi;
#[cfg(feature = "playback")]
pub mod playback;
pub mod processing;
pub mod tools;

// 重新导出核心类型
pub use audio::{HandleState, Info, Mode, Sample, SndFile};
pub use error::{SndError, SndResult};
pub use processing::{ByteOrder, i16_to_bytes, i16_to_bytes_be, i16_to_bytes_le};
