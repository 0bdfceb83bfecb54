//! 工具函数模块
//!
//! 提供日志初始化、播放时长与时刻计算、路径显示等通用工具函数。

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tracing_subscriber::EnvFilter;

use super::constants::{logging, playback};
use crate::audio::Info;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；未设置时按 verbose 选择默认过滤规则。
/// 重复初始化（例如测试中）静默忽略。
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        logging::VERBOSE_FILTER
    } else {
        logging::DEFAULT_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 播放时长：`frames / sample_rate` 秒
#[inline]
pub fn playback_duration(info: &Info) -> Duration {
    info.duration()
}

/// 下一次状态查询前的休眠时长：不超过查询间隔，也不越过剩余时长
pub fn next_poll_interval(remaining: Duration) -> Duration {
    remaining.min(Duration::from_millis(playback::POLL_INTERVAL_MS))
}

/// 从 `start` 开始播放 `duration` 后的结束时刻，格式 `HH:MM:SS`
pub fn finish_clock<Tz: TimeZone>(start: DateTime<Tz>, duration: Duration) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let end = chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| start.clone().checked_add_signed(d))
        .unwrap_or(start);
    end.format("%H:%M:%S").to_string()
}

/// 以本地时间计算结束时刻
pub fn finish_clock_local(duration: Duration) -> String {
    finish_clock(Local::now(), duration)
}

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

pub use path::extract_filename_lossy;
