//! sndfile-player - 主程序入口
//!
//! 纯流程控制器：用 libsndfile 把整个文件读成16位样本，交给 OpenAL 播放，
//! 等待一个文件时长（或声源提前停止）后退出。

use std::process;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use sndfile::{
    SndFile, i16_to_bytes_le,
    playback::{AudioDevice, BufferFormat, SourceState},
    tools::{self, AppConfig, constants::exit_codes, utils::extract_filename_lossy},
};

/// 错误处理：打印完整的错误链并以通用错误码退出
fn handle_error(error: anyhow::Error) -> ! {
    eprintln!("[ERROR] 错误 / Error: {error:#}");
    process::exit(exit_codes::GENERAL_ERROR);
}

fn play(config: &AppConfig) -> Result<()> {
    // ===== 设备 =====
    let device = AudioDevice::open_default().context("无法打开音频设备 / Cannot open audio device")?;
    // 缓冲区先于声源创建，保证声源先被释放（先解除排队，再删除缓冲区）
    let buffer = device.gen_buffer().context("无法创建缓冲区 / Cannot create buffer")?;
    let source = device.gen_source().context("无法创建声源 / Cannot create source")?;

    // ===== 解码 =====
    let mut file = SndFile::open_read(&config.input_path).with_context(|| {
        format!(
            "无法打开文件 / Cannot open file: {}",
            config.input_path.display()
        )
    })?;
    let info = *file.info();
    debug!(
        "{}: {} frames, {} Hz, {} ch",
        extract_filename_lossy(&config.input_path),
        info.frames,
        info.sample_rate,
        info.channels
    );

    let format = BufferFormat::for_channels(info.channels)?;
    let samples = file
        .read_all()
        .context("读取音频数据失败 / Failed to read audio data")?;

    // ===== 上传并播放 =====
    let bytes = i16_to_bytes_le(&samples);
    buffer
        .upload(format, &bytes, info.sample_rate)
        .context("上传音频数据失败 / Failed to upload audio data")?;
    source.queue_buffer(&buffer)?;
    source.set_looping(config.looping)?;
    source.set_gain(config.gain)?;
    source.play()?;

    let duration = tools::playback_duration(&info);
    let seconds = duration.as_secs_f64();
    let finish = tools::finish_clock_local(duration);
    println!(
        "正在播放，时长 {seconds:.3} 秒，预计结束于 {finish} / Playing now. It will play for {seconds:.3} seconds and should be done playing at {finish}"
    );

    let deadline = Instant::now() + duration;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(tools::next_poll_interval(remaining));
        if source.state()? == SourceState::Stopped {
            debug!("source stopped before the expected duration");
            break;
        }
    }
    source.stop()?;
    info!("playback finished");

    file.close();
    drop(source);
    drop(buffer);
    device.shutdown();
    Ok(())
}

fn main() {
    let config = tools::parse_player_args();
    tools::init_logging(config.verbose);
    tools::show_startup_info(&config);

    if let Err(error) = play(&config) {
        handle_error(error);
    }
}
