//! 声音文件句柄集成测试
//!
//! 用 hound 生成的已知内容固件验证 libsndfile 读取、写入、定位与生命周期行为。


use audio_test_fixtures::{
    MONO_FRAMES, MULTI_FRAMES, STEREO_FRAMES, ensure_fixtures_generated, fixture_path, mono_sample,
    multi_sample, scratch_path, stereo_sample,
};
use sndfile::audio::{self, format};
use sndfile::{HandleState, Info, Mode, SndError, SndFile, i16_to_bytes_le};
use std::io::SeekFrom;

fn log(msg_zh: impl AsRef<str>, msg_en: impl AsRef<str>) {
    println!("{} / {}", msg_zh.as_ref(), msg_en.as_ref());
}

// ========== 打开 ==========

#[test]
fn test_open_nonexistent_path_fails() {
    let mut file = SndFile::new(Info::default());
    let err = file
        .open("/nonexistent/dir/missing.wav", Mode::Read)
        .unwrap_err();

    match &err {
        SndError::OpenFailure { path, message } => {
            assert!(path.ends_with("missing.wav"));
            assert!(!message.is_empty(), "原生错误信息不应为空");
        }
        other => panic!("expected OpenFailure, got {other:?}"),
    }
    assert_eq!(file.state(), HandleState::Unopened);
    assert!(!file.is_open());
}

#[test]
fn test_open_fake_and_empty_files_fail() {
    ensure_fixtures_generated();
    for name in ["fake_audio.wav", "empty.wav"] {
        let result = SndFile::open_read(fixture_path(name));
        assert!(
            matches!(result, Err(SndError::OpenFailure { .. })),
            "{name} should not open"
        );
    }
}

#[test]
fn test_open_twice_is_misuse() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("mono_1s.wav")).unwrap();
    let err = file.open(fixture_path("mono_1s.wav"), Mode::Read).unwrap_err();
    assert!(err.is_misuse());
    assert!(file.is_open(), "失败的重复打开不应影响原句柄");
}

#[test]
fn test_read_mode_ignores_preset_format() {
    ensure_fixtures_generated();
    let preset = Info {
        format: format::FLAC | format::PCM_24,
        ..Default::default()
    };
    let mut preset_file = SndFile::new(preset);
    preset_file
        .open(fixture_path("mono_1s.wav"), Mode::Read)
        .unwrap();
    let plain = SndFile::open_read(fixture_path("mono_1s.wav")).unwrap();

    assert_eq!(preset_file.info(), plain.info());
    assert_eq!(format::major(preset_file.info().format), format::WAV);
}

// ========== 读取 ==========

#[test]
fn test_mono_pcm16_scenario() {
    log("单声道PCM16完整读取", "Mono PCM16 full read");
    ensure_fixtures_generated();

    let mut file = SndFile::open_read(fixture_path("mono_1s.wav")).unwrap();
    let info = *file.info();
    assert_eq!(info.frames, MONO_FRAMES as u64);
    assert_eq!(info.sample_rate, 44100);
    assert_eq!(info.channels, 1);
    assert!(info.seekable);
    assert_eq!(format::major(info.format), format::WAV);
    assert_eq!(format::subtype(info.format), format::PCM_16);
    assert!((info.duration_seconds() - 1.0).abs() < 1e-9);

    let samples = file.read_frames(info.frames).unwrap();
    assert_eq!(samples.len(), MONO_FRAMES);
    for (i, s) in samples.iter().enumerate() {
        assert_eq!(*s, mono_sample(i), "sample {i}");
    }

    let bytes = i16_to_bytes_le(&samples);
    assert_eq!(bytes.len(), 88200);
    assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), mono_sample(1));

    file.close();
    assert_eq!(file.state(), HandleState::Closed);
}

#[test]
fn test_stereo_is_interleaved() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("stereo_short.wav")).unwrap();
    assert_eq!(file.info().channels, 2);
    assert_eq!(file.info().frames, STEREO_FRAMES as u64);

    let samples = file.read_frames(STEREO_FRAMES as u64).unwrap();
    assert_eq!(samples.len(), STEREO_FRAMES * 2);
    for (i, frame) in samples.chunks_exact(2).enumerate() {
        let (left, right) = stereo_sample(i);
        assert_eq!(frame, [left, right], "frame {i}");
    }
}

#[test]
fn test_three_channel_file_reads() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("3_channels.wav")).unwrap();
    assert_eq!(file.info().channels, 3);

    let samples = file.read_frames(MULTI_FRAMES as u64).unwrap();
    assert_eq!(samples.len(), MULTI_FRAMES * 3);
    assert_eq!(samples[3 * 10 + 2], multi_sample(10, 2));
}

#[test]
fn test_partial_reads_advance_cursor() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("stereo_short.wav")).unwrap();

    let first = file.read_frames(600).unwrap();
    assert_eq!(first.len(), 1200);

    // 请求超出剩余量：只返回剩余的400帧
    let rest = file.read_frames(600).unwrap();
    assert_eq!(rest.len(), 800);
    assert_eq!(rest[0], stereo_sample(600).0);

    let err = file.read_frames(1).unwrap_err();
    assert_eq!(err, SndError::EndOfData);
    assert!(err.is_end_of_data());
}

#[test]
fn test_request_larger_than_file_is_clamped() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("stereo_short.wav")).unwrap();
    let samples = file.read_frames(u64::MAX).unwrap();
    assert_eq!(samples.len(), STEREO_FRAMES * 2);
}

#[test]
fn test_zero_frame_request_returns_empty() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("mono_1s.wav")).unwrap();
    assert!(file.read_frames(0).unwrap().is_empty());
    // 游标未移动
    assert_eq!(file.read_frames(1).unwrap(), vec![mono_sample(0)]);
}

#[test]
fn test_zero_length_file() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("zero_length.wav")).unwrap();
    assert_eq!(file.info().frames, 0);
    assert_eq!(file.info().duration_seconds(), 0.0);
    assert!(file.read_frames(0).unwrap().is_empty());
    assert_eq!(file.read_frames(16).unwrap_err(), SndError::EndOfData);
}

#[test]
fn test_wider_sample_types_are_scaled() {
    ensure_fixtures_generated();
    let path = fixture_path("stereo_short.wav");

    let mut file = SndFile::open_read(&path).unwrap();
    let wide = file.read_frames_i32(8).unwrap();
    for (i, frame) in wide.chunks_exact(2).enumerate() {
        let (left, right) = stereo_sample(i);
        assert_eq!(frame[0], (left as i32) << 16);
        assert_eq!(frame[1], (right as i32) << 16);
    }

    let mut file = SndFile::open_read(&path).unwrap();
    let floats = file.read_frames_f32(8).unwrap();
    let doubles = {
        let mut again = SndFile::open_read(&path).unwrap();
        again.read_frames_f64(8).unwrap()
    };
    for (i, (f, d)) in floats.iter().zip(&doubles).enumerate() {
        assert!((-1.0..=1.0).contains(f), "sample {i}");
        assert!((*f as f64 - d).abs() < 1e-6, "sample {i}");
    }
}

// ========== 生命周期 ==========

#[test]
fn test_close_is_idempotent_and_terminal() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("mono_1s.wav")).unwrap();
    file.close();
    file.close();
    assert_eq!(file.state(), HandleState::Closed);

    let err = file.read_frames(10).unwrap_err();
    assert_eq!(
        err,
        SndError::ResourceMisuse {
            operation: "read",
            state: HandleState::Closed
        }
    );
    assert!(file.open(fixture_path("mono_1s.wav"), Mode::Read).unwrap_err().is_misuse());
    assert!(file.seek(SeekFrom::Start(0)).unwrap_err().is_misuse());
}

#[test]
fn test_close_unopened_handle() {
    let mut file = SndFile::new(Info::default());
    file.close();
    assert_eq!(file.state(), HandleState::Closed);
}

#[test]
fn test_drop_releases_many_handles() {
    ensure_fixtures_generated();
    // 无显式 close：若 Drop 不释放，大量打开最终会耗尽文件描述符
    for _ in 0..2048 {
        let file = SndFile::open_read(fixture_path("stereo_short.wav")).unwrap();
        assert!(file.is_open());
    }
}

// ========== 定位 ==========

#[test]
fn test_seek() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("stereo_short.wav")).unwrap();

    assert_eq!(file.seek(SeekFrom::Start(500)).unwrap(), 500);
    assert_eq!(file.read_frames(1).unwrap()[0], stereo_sample(500).0);

    assert_eq!(file.seek(SeekFrom::Current(-1)).unwrap(), 500);
    assert_eq!(file.seek(SeekFrom::End(-10)).unwrap(), 990);
    assert_eq!(file.read_frames(100).unwrap().len(), 20);

    assert!(matches!(
        file.seek(SeekFrom::Start(5000)),
        Err(SndError::SeekFailure(_))
    ));
}

// ========== 写入 ==========

#[test]
fn test_write_then_read_back() {
    let path = scratch_path("round_trip.wav");
    let samples: Vec<i16> = (0..2000).map(|i| (i * 13 - 9000) as i16).collect();

    let spec = Info::for_write(22050, 2, format::WAV | format::PCM_16);
    assert!(spec.is_format_valid());
    {
        let mut out = SndFile::open_with(&path, Mode::Write, spec).unwrap();
        assert_eq!(out.mode(), Some(Mode::Write));
        assert_eq!(out.write_frames(&samples).unwrap(), 1000);
        out.sync().unwrap();
        out.close();
    }

    let mut file = SndFile::open_read(&path).unwrap();
    assert_eq!(file.info().frames, 1000);
    assert_eq!(file.info().sample_rate, 22050);
    assert_eq!(file.info().channels, 2);
    assert_eq!(file.read_frames(1000).unwrap(), samples);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_write_rejects_partial_frames() {
    let path = scratch_path("partial.wav");
    let spec = Info::for_write(44100, 2, format::WAV | format::PCM_16);
    let mut out = SndFile::open_with(&path, Mode::Write, spec).unwrap();

    let err = out.write_frames(&[1, 2, 3]).unwrap_err();
    assert!(matches!(err, SndError::InvalidInput(_)));
    assert_eq!(out.write_frames(&[]).unwrap(), 0);

    drop(out);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_invalid_write_format_fails_to_open() {
    let path = scratch_path("invalid.flac");
    // FLAC 不支持浮点编码
    let spec = Info::for_write(44100, 1, format::FLAC | format::FLOAT);
    assert!(!spec.is_format_valid());

    let mut file = SndFile::new(spec);
    assert!(matches!(
        file.open(&path, Mode::Write),
        Err(SndError::OpenFailure { .. })
    ));
    assert_eq!(file.state(), HandleState::Unopened);
}

#[test]
fn test_read_write_mode_keeps_format_and_appends() {
    log("读写模式：保留格式并追加写入", "ReadWrite mode keeps format and appends");
    ensure_fixtures_generated();
    let path = scratch_path("read_write.wav");
    std::fs::copy(fixture_path("mono_1s.wav"), &path).unwrap();

    let wav_pcm16 = format::WAV | format::PCM_16;
    let preset = Info {
        format: wav_pcm16,
        ..Default::default()
    };
    let appended: Vec<i16> = (0..100).map(|i| (i * 3 - 150) as i16).collect();
    {
        let mut file = SndFile::open_with(&path, Mode::ReadWrite, preset).unwrap();
        assert_eq!(file.mode(), Some(Mode::ReadWrite));
        assert_ne!(file.info().format, 0);
        assert_eq!(file.info().format, wav_pcm16);
        assert_eq!(file.info().frames, MONO_FRAMES as u64);

        let head = file.read_frames(64).unwrap();
        let expected: Vec<i16> = (0..64).map(mono_sample).collect();
        assert_eq!(head, expected);

        assert_eq!(file.seek(SeekFrom::End(0)).unwrap(), MONO_FRAMES as u64);
        assert_eq!(file.write_frames(&appended).unwrap(), 100);
        file.close();
    }

    let mut file = SndFile::open_read(&path).unwrap();
    assert_eq!(file.info().frames, MONO_FRAMES as u64 + 100);
    let all = file.read_all().unwrap();
    assert_eq!(all.len(), MONO_FRAMES + 100);
    assert_eq!(all[MONO_FRAMES - 1], mono_sample(MONO_FRAMES - 1));
    assert_eq!(&all[MONO_FRAMES..], appended.as_slice());

    let _ = std::fs::remove_file(&path);
}

// ========== 整体读取 ==========

#[test]
fn test_read_all_returns_every_frame() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("stereo_short.wav")).unwrap();
    let samples = file.read_all().unwrap();
    assert_eq!(samples.len(), STEREO_FRAMES * 2);
    assert_eq!(file.read_all().unwrap_err(), SndError::EndOfData);
}

#[test]
fn test_read_all_on_zero_length_is_end_of_data() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("zero_length.wav")).unwrap();
    // 0帧请求本身返回空缓冲区，整体读取则视为数据结束
    assert!(file.read_frames(0).unwrap().is_empty());
    assert_eq!(file.read_all().unwrap_err(), SndError::EndOfData);
}

#[test]
fn test_read_all_on_closed_handle_is_misuse() {
    ensure_fixtures_generated();
    let mut file = SndFile::open_read(fixture_path("mono_1s.wav")).unwrap();
    file.close();
    assert!(file.read_all().unwrap_err().is_misuse());
}

// ========== 全局 ==========

#[test]
fn test_version_string() {
    let version = audio::version();
    assert!(version.starts_with("libsndfile"), "got {version}");
}
