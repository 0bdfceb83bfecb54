//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 播放默认值
pub mod playback {
    /// 默认增益（原始音量）
    pub const DEFAULT_GAIN: f32 = 1.0;

    /// 允许的最大增益
    ///
    /// OpenAL 允许大于1的增益，但实现可能截断；10倍已远超可用范围
    pub const MAX_GAIN: f32 = 10.0;

    /// 播放等待期间查询声源状态的间隔（毫秒）
    pub const POLL_INTERVAL_MS: u64 = 100;
}

/// 日志过滤默认值（可被 RUST_LOG 覆盖）
pub mod logging {
    pub const DEFAULT_FILTER: &str = "sndfile=info";
    pub const VERBOSE_FILTER: &str = "sndfile=debug";
}

/// 错误退出码定义
pub mod exit_codes {
    /// 任何失败统一使用
    pub const GENERAL_ERROR: i32 = 1;
}
