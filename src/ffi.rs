//! libsndfile 原始 FFI 声明
//!
//! 与 `sndfile.h` 一一对应，结构体布局必须与 C 端完全一致。
//! 此模块只做声明，不做任何安全封装；安全接口见 [`crate::audio`]。

#![allow(non_camel_case_types)]

use libc::{c_char, c_double, c_float, c_int, c_short};

/// `sf_count_t`：libsndfile 的 64 位帧/样本计数类型
pub type sf_count_t = i64;

/// 不透明句柄 `SNDFILE`
#[repr(C)]
pub struct SNDFILE {
    _private: [u8; 0],
}

/// `SF_INFO` 的精确镜像
///
/// 字段顺序与类型不可调整：frames 为 64 位，其余均为 C `int`。
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SF_INFO {
    pub frames: sf_count_t,
    pub samplerate: c_int,
    pub channels: c_int,
    pub format: c_int,
    pub sections: c_int,
    pub seekable: c_int,
}

// 打开模式（sndfile.h 中的固定值）
pub const SFM_READ: c_int = 0x10;
pub const SFM_WRITE: c_int = 0x20;
pub const SFM_RDWR: c_int = 0x30;

pub const SF_ERR_NO_ERROR: c_int = 0;

#[link(name = "sndfile")]
unsafe extern "C" {
    pub fn sf_open(path: *const c_char, mode: c_int, sfinfo: *mut SF_INFO) -> *mut SNDFILE;
    pub fn sf_close(sndfile: *mut SNDFILE) -> c_int;
    pub fn sf_write_sync(sndfile: *mut SNDFILE);

    pub fn sf_error(sndfile: *mut SNDFILE) -> c_int;
    pub fn sf_strerror(sndfile: *mut SNDFILE) -> *const c_char;
    pub fn sf_format_check(info: *const SF_INFO) -> c_int;
    pub fn sf_version_string() -> *const c_char;

    pub fn sf_seek(sndfile: *mut SNDFILE, frames: sf_count_t, whence: c_int) -> sf_count_t;

    pub fn sf_readf_short(sndfile: *mut SNDFILE, ptr: *mut c_short, frames: sf_count_t)
    -> sf_count_t;
    pub fn sf_readf_int(sndfile: *mut SNDFILE, ptr: *mut c_int, frames: sf_count_t) -> sf_count_t;
    pub fn sf_readf_float(sndfile: *mut SNDFILE, ptr: *mut c_float, frames: sf_count_t)
    -> sf_count_t;
    pub fn sf_readf_double(
        sndfile: *mut SNDFILE,
        ptr: *mut c_double,
        frames: sf_count_t,
    ) -> sf_count_t;

    pub fn sf_writef_short(
        sndfile: *mut SNDFILE,
        ptr: *const c_short,
        frames: sf_count_t,
    ) -> sf_count_t;
    pub fn sf_writef_int(sndfile: *mut SNDFILE, ptr: *const c_int, frames: sf_count_t)
    -> sf_count_t;
    pub fn sf_writef_float(
        sndfile: *mut SNDFILE,
        ptr: *const c_float,
        frames: sf_count_t,
    ) -> sf_count_t;
    pub fn sf_writef_double(
        sndfile: *mut SNDFILE,
        ptr: *const c_double,
        frames: sf_count_t,
    ) -> sf_count_t;
}
