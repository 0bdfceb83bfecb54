//! 输出格式化模块
//!
//! 负责 `sndfile-info` 的文本与JSON输出。

use serde::Serialize;
use std::path::Path;

use crate::audio::{Info, format};

/// 单个文件的报告条目
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport<'a> {
    pub path: &'a Path,
    pub format_name: String,
    pub duration_seconds: f64,
    #[serde(flatten)]
    pub info: Info,
}

impl<'a> InfoReport<'a> {
    pub fn new(path: &'a Path, info: Info) -> Self {
        Self {
            path,
            format_name: format::describe(info.format),
            duration_seconds: info.duration_seconds(),
            info,
        }
    }
}

/// 文本格式：每行一个字段，与 sndfile-info 的习惯一致
pub fn format_info_text(report: &InfoReport<'_>) -> String {
    let info = &report.info;
    let mut out = String::new();
    out.push_str(&format!("File        : {}\n", report.path.display()));
    out.push_str(&format!("Frames      : {}\n", info.frames));
    out.push_str(&format!("Sample Rate : {}\n", info.sample_rate));
    out.push_str(&format!("Channels    : {}\n", info.channels));
    out.push_str(&format!(
        "Format      : 0x{:08X} ({})\n",
        info.format, report.format_name
    ));
    out.push_str(&format!("Sections    : {}\n", info.sections));
    out.push_str(&format!(
        "Seekable    : {}\n",
        if info.seekable { "TRUE" } else { "FALSE" }
    ));
    out.push_str(&format!("Duration    : {:.3} s\n", report.duration_seconds));
    out
}

/// JSON格式：全部报告组成一个数组
pub fn format_info_json(reports: &[InfoReport<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::format::{PCM_16, WAV};

    fn mono_info() -> Info {
        Info {
            frames: 44100,
            sample_rate: 44100,
            channels: 1,
            format: WAV | PCM_16,
            sections: 1,
            seekable: true,
        }
    }

    #[test]
    fn test_text_output() {
        let path = Path::new("tone.wav");
        let text = format_info_text(&InfoReport::new(path, mono_info()));
        assert!(text.contains("File        : tone.wav"));
        assert!(text.contains("Format      : 0x00010002 (WAV/PCM_16)"));
        assert!(text.contains("Seekable    : TRUE"));
        assert!(text.contains("Duration    : 1.000 s"));
    }

    #[test]
    fn test_json_output_flattens_info() {
        let path = Path::new("tone.wav");
        let json = format_info_json(&[InfoReport::new(path, mono_info())]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = &value[0];
        assert_eq!(entry["path"], "tone.wav");
        assert_eq!(entry["frames"], 44100);
        assert_eq!(entry["sample_rate"], 44100);
        assert_eq!(entry["channels"], 1);
        assert_eq!(entry["seekable"], true);
        assert_eq!(entry["format_name"], "WAV/PCM_16");
    }
}
