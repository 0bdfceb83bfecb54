//! 工具模块集合
//!
//! 包含CLI、格式化、日志等工具模块，支持两个可执行文件的流程控制。

pub mod cli;
pub mod constants;
pub mod formatter;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, InfoConfig, parse_info_args, parse_player_args, show_startup_info};
pub use formatter::{InfoReport, format_info_json, format_info_text};
pub use utils::{finish_clock_local, init_logging, next_poll_interval, playback_duration};
