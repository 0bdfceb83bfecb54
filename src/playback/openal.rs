//! OpenAL 原始 FFI 声明
//!
//! 只声明示例播放器用到的最小子集。

#![allow(non_camel_case_types, non_snake_case)]

use libc::{c_char, c_float, c_int, c_uint, c_void};

pub type ALuint = c_uint;
pub type ALint = c_int;
pub type ALenum = c_int;
pub type ALsizei = c_int;
pub type ALfloat = c_float;
pub type ALCint = c_int;
pub type ALCboolean = c_char;

#[repr(C)]
pub struct ALCdevice {
    _private: [u8; 0],
}

#[repr(C)]
pub struct ALCcontext {
    _private: [u8; 0],
}

pub const ALC_FALSE: ALCboolean = 0;

pub const AL_FALSE: ALint = 0;
pub const AL_TRUE: ALint = 1;

// 错误码
pub const AL_NO_ERROR: ALenum = 0;
pub const AL_INVALID_NAME: ALenum = 0xA001;
pub const AL_INVALID_ENUM: ALenum = 0xA002;
pub const AL_INVALID_VALUE: ALenum = 0xA003;
pub const AL_INVALID_OPERATION: ALenum = 0xA004;
pub const AL_OUT_OF_MEMORY: ALenum = 0xA005;

// 缓冲区格式
pub const AL_FORMAT_MONO16: ALenum = 0x1101;
pub const AL_FORMAT_STEREO16: ALenum = 0x1103;

// 声源属性
pub const AL_LOOPING: ALenum = 0x1007;
pub const AL_BUFFER: ALenum = 0x1009;
pub const AL_GAIN: ALenum = 0x100A;
pub const AL_SOURCE_STATE: ALenum = 0x1010;

// 声源状态
pub const AL_INITIAL: ALint = 0x1011;
pub const AL_PLAYING: ALint = 0x1012;
pub const AL_PAUSED: ALint = 0x1013;
pub const AL_STOPPED: ALint = 0x1014;

#[cfg_attr(target_os = "macos", link(name = "OpenAL", kind = "framework"))]
#[cfg_attr(target_os = "windows", link(name = "OpenAL32"))]
#[cfg_attr(
    not(any(target_os = "macos", target_os = "windows")),
    link(name = "openal")
)]
unsafe extern "C" {
    pub fn alcOpenDevice(devicename: *const c_char) -> *mut ALCdevice;
    pub fn alcCloseDevice(device: *mut ALCdevice) -> ALCboolean;
    pub fn alcCreateContext(device: *mut ALCdevice, attrlist: *const ALCint) -> *mut ALCcontext;
    pub fn alcMakeContextCurrent(context: *mut ALCcontext) -> ALCboolean;
    pub fn alcDestroyContext(context: *mut ALCcontext);

    pub fn alGetError() -> ALenum;

    pub fn alGenSources(n: ALsizei, sources: *mut ALuint);
    pub fn alDeleteSources(n: ALsizei, sources: *const ALuint);
    pub fn alSourcei(source: ALuint, param: ALenum, value: ALint);
    pub fn alSourcef(source: ALuint, param: ALenum, value: ALfloat);
    pub fn alGetSourcei(source: ALuint, param: ALenum, value: *mut ALint);
    pub fn alSourceQueueBuffers(source: ALuint, nb: ALsizei, buffers: *const ALuint);
    pub fn alSourcePlay(source: ALuint);
    pub fn alSourceStop(source: ALuint);

    pub fn alGenBuffers(n: ALsizei, buffers: *mut ALuint);
    pub fn alDeleteBuffers(n: ALsizei, buffers: *const ALuint);
    pub fn alBufferData(
        buffer: ALuint,
        format: ALenum,
        data: *const c_void,
        size: ALsizei,
        freq: ALsizei,
    );
}
