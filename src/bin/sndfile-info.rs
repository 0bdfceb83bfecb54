//! sndfile-info - 打印音频文件的格式信息
//!
//! 逐个打开文件并输出 `Info`；任一文件失败时以通用错误码退出，
//! 但仍会处理其余文件。

use std::process;

use sndfile::{
    SndFile,
    tools::{self, InfoReport, constants::exit_codes, format_info_json, format_info_text},
};

fn main() {
    let config = tools::parse_info_args();
    tools::init_logging(config.verbose);

    let mut reports = Vec::with_capacity(config.inputs.len());
    let mut failures = 0usize;

    for path in &config.inputs {
        match SndFile::open_read(path) {
            Ok(mut file) => {
                reports.push(InfoReport::new(path, *file.info()));
                file.close();
            }
            Err(e) => {
                failures += 1;
                eprintln!("[ERROR] 错误 / Error: {e}");
            }
        }
    }

    if config.json {
        match format_info_json(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("[ERROR] JSON序列化失败 / JSON serialization failed: {e}");
                process::exit(exit_codes::GENERAL_ERROR);
            }
        }
    } else {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", format_info_text(report));
        }
    }

    if failures > 0 {
        process::exit(exit_codes::GENERAL_ERROR);
    }
}
