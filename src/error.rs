//! 统一错误处理框架
//!
//! 绑定层所有失败都以 [`SndError`] 返回给调用方，库内部从不终止进程，
//! 也不做任何重试。原生库的诊断文本原样携带在错误中。

use std::fmt;
use std::path::PathBuf;

use crate::audio::HandleState;

/// 绑定层统一错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SndError {
    /// 调用方传入的参数无法转换为原生调用（路径含NUL、缓冲区不是整帧等）
    InvalidInput(String),

    /// 原生库拒绝了路径/模式/格式
    OpenFailure { path: PathBuf, message: String },

    /// 读取到0帧且原生错误状态干净：没有更多数据
    EndOfData,

    /// 读取到0帧且原生库报告了错误
    ReadFailure(String),

    /// 写入帧数少于请求帧数
    WriteFailure(String),

    /// 定位失败（不可定位的文件、越界等）
    SeekFailure(String),

    /// 在未打开或已关闭的句柄上执行操作
    ResourceMisuse {
        operation: &'static str,
        state: HandleState,
    },

    /// 音频输出设备错误（仅 playback 特性使用）
    AudioOutput(String),
}

impl fmt::Display for SndError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SndError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            SndError::OpenFailure { path, message } => {
                write!(f, "failed to open {}: {message}", path.display())
            }
            SndError::EndOfData => write!(f, "end of data"),
            SndError::ReadFailure(msg) => write!(f, "read failed: {msg}"),
            SndError::WriteFailure(msg) => write!(f, "write failed: {msg}"),
            SndError::SeekFailure(msg) => write!(f, "seek failed: {msg}"),
            SndError::ResourceMisuse { operation, state } => {
                write!(f, "cannot {operation} a handle in state {state}")
            }
            SndError::AudioOutput(msg) => write!(f, "audio output error: {msg}"),
        }
    }
}

impl std::error::Error for SndError {}

impl SndError {
    /// 是否为"没有更多数据"（区别于读取失败）
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, SndError::EndOfData)
    }

    /// 是否为调用方违反句柄状态约定
    pub fn is_misuse(&self) -> bool {
        matches!(self, SndError::ResourceMisuse { .. })
    }
}

/// 绑定层操作的标准Result类型
pub type SndResult<T> = Result<T, SndError>;

// ==================== 错误转换Helper函数 ====================

/// 创建句柄误用错误的helper函数
#[inline]
pub(crate) fn misuse(operation: &'static str, state: HandleState) -> SndError {
    SndError::ResourceMisuse { operation, state }
}

/// 创建参数错误的helper函数
#[inline]
pub(crate) fn invalid_input<E: fmt::Display>(context: &str, err: E) -> SndError {
    SndError::InvalidInput(format!("{context}: {err}"))
}
