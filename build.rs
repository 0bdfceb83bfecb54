//! 构建脚本
//!
//! 原生库默认通过系统链接器路径查找（`#[link(name = ...)]`）。
//! 非标准安装位置可通过环境变量追加搜索路径：
//! - `SNDFILE_LIB_DIR`：libsndfile 所在目录
//! - `OPENAL_LIB_DIR`：OpenAL 所在目录（仅 playback 特性）

use std::env;

fn main() {
    for var in ["SNDFILE_LIB_DIR", "OPENAL_LIB_DIR"] {
        println!("cargo:rerun-if-env-changed={var}");
        if let Ok(dir) = env::var(var)
            && !dir.is_empty()
        {
            println!("cargo:rustc-link-search=native={dir}");
        }
    }
}
