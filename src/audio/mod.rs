//! 声音文件模块
//!
//! 对 libsndfile 的安全封装：描述信息、格式代码和文件句柄。

pub mod format;
mod info;
mod sndfile;

pub use info::Info;
pub use sndfile::{HandleState, Mode, Sample, SndFile, last_error, version};
