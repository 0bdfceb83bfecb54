//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use super::constants::{exit_codes, playback};

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 播放器配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 要播放的音频文件
    pub input_path: PathBuf,

    /// 是否显示详细信息
    pub verbose: bool,

    /// 播放增益
    pub gain: f32,

    /// 是否循环播放
    pub looping: bool,
}

/// 信息查看工具配置
#[derive(Debug, Clone, PartialEq)]
pub struct InfoConfig {
    pub inputs: Vec<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .long("verbose")
        .short('v')
        .help("显示详细处理信息 / Show debug logging")
        .action(ArgAction::SetTrue)
}

/// 播放器命令定义
pub fn player_command() -> Command {
    Command::new("sndfile-player")
        .version(VERSION)
        .about("通过 OpenAL 播放 libsndfile 可读取的音频文件 / Play a sound file through OpenAL")
        .arg(
            Arg::new("FILE")
                .help("音频文件路径 / Sound file to play")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(verbose_arg())
        .arg(
            Arg::new("gain")
                .long("gain")
                .short('g')
                .help("播放增益 / Playback gain")
                .value_name("GAIN")
                .value_parser(clap::value_parser!(f32))
                .default_value("1.0"),
        )
        .arg(
            Arg::new("loop")
                .long("loop")
                .help("循环播放 / Loop playback (still stops after one duration)")
                .action(ArgAction::SetTrue),
        )
}

/// 信息查看工具命令定义
pub fn info_command() -> Command {
    Command::new("sndfile-info")
        .version(VERSION)
        .about("显示音频文件的格式信息 / Print sound file information")
        .arg(
            Arg::new("FILES")
                .help("一个或多个音频文件 / One or more sound files")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("以JSON输出 / Emit JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(verbose_arg())
}

/// 从给定参数解析播放器配置（便于测试）
pub fn parse_player_args_from<I, T>(args: I) -> Result<AppConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = player_command();
    let matches = command.try_get_matches_from_mut(args)?;

    let gain = matches
        .get_one::<f32>("gain")
        .copied()
        .unwrap_or(playback::DEFAULT_GAIN);
    if !(0.0..=playback::MAX_GAIN).contains(&gain) {
        return Err(command.error(
            ErrorKind::ValueValidation,
            format!("gain must be within 0.0..={}", playback::MAX_GAIN),
        ));
    }

    let input_path = matches
        .get_one::<PathBuf>("FILE")
        .cloned()
        .ok_or_else(|| command.error(ErrorKind::MissingRequiredArgument, "missing <FILE>"))?;

    Ok(AppConfig {
        input_path,
        verbose: matches.get_flag("verbose"),
        gain,
        looping: matches.get_flag("loop"),
    })
}

/// 从给定参数解析信息工具配置
pub fn parse_info_args_from<I, T>(args: I) -> Result<InfoConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = info_command().try_get_matches_from(args)?;
    Ok(InfoConfig {
        inputs: matches
            .get_many::<PathBuf>("FILES")
            .map(|files| files.cloned().collect())
            .unwrap_or_default(),
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
    })
}

/// 解析进程参数；帮助/版本正常退出，其余错误以退出码1结束
pub fn parse_player_args() -> AppConfig {
    parse_player_args_from(std::env::args_os()).unwrap_or_else(|e| exit_on_clap_error(e))
}

pub fn parse_info_args() -> InfoConfig {
    parse_info_args_from(std::env::args_os()).unwrap_or_else(|e| exit_on_clap_error(e))
}

fn exit_on_clap_error(error: clap::Error) -> ! {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        _ => {
            let _ = error.print();
            process::exit(exit_codes::GENERAL_ERROR);
        }
    }
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    if config.verbose {
        println!("🚀 sndfile-player v{VERSION}");
        println!("📝 libsndfile: {}", crate::audio::version());
        println!();
    }
}
