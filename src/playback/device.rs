//! OpenAL 设备、声源与缓冲区的 RAII 封装
//!
//! OpenAL 同一时刻只有一个"当前上下文"，因此进程内应只存在一个
//! [`AudioDevice`]。声源和缓冲区通过生命周期借用设备，保证在设备关闭前释放。

use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use tracing::{debug, warn};

use super::openal as al;
use crate::error::{SndError, SndResult};

/// 缓冲区样本格式（仅16位PCM）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferFormat {
    Mono16,
    Stereo16,
}

impl BufferFormat {
    /// 按声道数选择格式；1 → 单声道，2 → 立体声，其余不支持
    pub fn for_channels(channels: i32) -> SndResult<Self> {
        match channels {
            1 => Ok(BufferFormat::Mono16),
            2 => Ok(BufferFormat::Stereo16),
            n => Err(SndError::InvalidInput(format!(
                "{n} channels cannot be played (mono or stereo only)"
            ))),
        }
    }

    pub fn as_raw(self) -> al::ALenum {
        match self {
            BufferFormat::Mono16 => al::AL_FORMAT_MONO16,
            BufferFormat::Stereo16 => al::AL_FORMAT_STEREO16,
        }
    }

    /// 每帧字节数
    pub fn bytes_per_frame(self) -> usize {
        match self {
            BufferFormat::Mono16 => 2,
            BufferFormat::Stereo16 => 4,
        }
    }
}

/// 声源播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Initial,
    Playing,
    Paused,
    Stopped,
    Unknown(i32),
}

impl SourceState {
    fn from_raw(raw: al::ALint) -> Self {
        match raw {
            al::AL_INITIAL => SourceState::Initial,
            al::AL_PLAYING => SourceState::Playing,
            al::AL_PAUSED => SourceState::Paused,
            al::AL_STOPPED => SourceState::Stopped,
            other => SourceState::Unknown(other),
        }
    }
}

/// 默认输出设备及其上下文
pub struct AudioDevice {
    device: NonNull<al::ALCdevice>,
    context: NonNull<al::ALCcontext>,
}

impl AudioDevice {
    /// 打开默认输出设备，创建上下文并设为当前上下文
    pub fn open_default() -> SndResult<Self> {
        // SAFETY: 空指针表示默认设备
        let device = NonNull::new(unsafe { al::alcOpenDevice(ptr::null()) })
            .ok_or_else(|| SndError::AudioOutput("failed to open default device".to_string()))?;

        // SAFETY: device 有效；空属性列表表示默认属性
        let raw_context = unsafe { al::alcCreateContext(device.as_ptr(), ptr::null()) };
        let context = match NonNull::new(raw_context) {
            Some(context) => context,
            None => {
                // SAFETY: device 有效且尚未关闭
                unsafe { al::alcCloseDevice(device.as_ptr()) };
                return Err(SndError::AudioOutput("failed to create context".to_string()));
            }
        };

        // SAFETY: context 有效
        if unsafe { al::alcMakeContextCurrent(context.as_ptr()) } == al::ALC_FALSE {
            // SAFETY: 二者均有效且尚未释放
            unsafe {
                al::alcDestroyContext(context.as_ptr());
                al::alcCloseDevice(device.as_ptr());
            }
            return Err(SndError::AudioOutput("failed to make context current".to_string()));
        }

        debug!("opened default OpenAL device");
        Ok(Self { device, context })
    }

    /// 生成一个声源
    pub fn gen_source(&self) -> SndResult<Source<'_>> {
        let mut id: al::ALuint = 0;
        // SAFETY: 写入一个 ALuint
        unsafe { al::alGenSources(1, &mut id) };
        check_al_error("alGenSources")?;
        Ok(Source {
            id,
            _device: PhantomData,
        })
    }

    /// 生成一个缓冲区
    pub fn gen_buffer(&self) -> SndResult<Buffer<'_>> {
        let mut id: al::ALuint = 0;
        // SAFETY: 写入一个 ALuint
        unsafe { al::alGenBuffers(1, &mut id) };
        check_al_error("alGenBuffers")?;
        Ok(Buffer {
            id,
            _device: PhantomData,
        })
    }

    /// 显式关闭设备（等价于 drop）
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        // SAFETY: 先取消当前上下文，再销毁上下文并关闭设备，各只执行一次
        unsafe {
            al::alcMakeContextCurrent(ptr::null_mut());
            al::alcDestroyContext(self.context.as_ptr());
            if al::alcCloseDevice(self.device.as_ptr()) == al::ALC_FALSE {
                warn!("alcCloseDevice failed");
            }
        }
        debug!("closed OpenAL device");
    }
}

/// 声源（播放通道）
pub struct Source<'d> {
    id: al::ALuint,
    _device: PhantomData<&'d AudioDevice>,
}

impl Source<'_> {
    /// 把缓冲区加入播放队列
    ///
    /// 缓冲区必须比声源活得更久：声源在 drop 时会先解除排队。
    pub fn queue_buffer(&self, buffer: &Buffer<'_>) -> SndResult<()> {
        // SAFETY: 读取一个 ALuint
        unsafe { al::alSourceQueueBuffers(self.id, 1, &buffer.id) };
        check_al_error("alSourceQueueBuffers")
    }

    pub fn set_looping(&self, looping: bool) -> SndResult<()> {
        let value = if looping { al::AL_TRUE } else { al::AL_FALSE };
        // SAFETY: id 来自 alGenSources
        unsafe { al::alSourcei(self.id, al::AL_LOOPING, value) };
        check_al_error("alSourcei(AL_LOOPING)")
    }

    pub fn set_gain(&self, gain: f32) -> SndResult<()> {
        // SAFETY: id 来自 alGenSources
        unsafe { al::alSourcef(self.id, al::AL_GAIN, gain) };
        check_al_error("alSourcef(AL_GAIN)")
    }

    pub fn play(&self) -> SndResult<()> {
        // SAFETY: id 来自 alGenSources
        unsafe { al::alSourcePlay(self.id) };
        check_al_error("alSourcePlay")
    }

    pub fn stop(&self) -> SndResult<()> {
        // SAFETY: id 来自 alGenSources
        unsafe { al::alSourceStop(self.id) };
        check_al_error("alSourceStop")
    }

    pub fn state(&self) -> SndResult<SourceState> {
        let mut raw: al::ALint = 0;
        // SAFETY: 写入一个 ALint
        unsafe { al::alGetSourcei(self.id, al::AL_SOURCE_STATE, &mut raw) };
        check_al_error("alGetSourcei(AL_SOURCE_STATE)")?;
        Ok(SourceState::from_raw(raw))
    }
}

impl Drop for Source<'_> {
    fn drop(&mut self) {
        // SAFETY: 停止并解除所有排队缓冲区后删除，id 只删除一次
        unsafe {
            al::alSourceStop(self.id);
            al::alSourcei(self.id, al::AL_BUFFER, 0);
            al::alDeleteSources(1, &self.id);
        }
        if let Err(e) = check_al_error("alDeleteSources") {
            warn!("{e}");
        }
    }
}

/// 音频缓冲区
pub struct Buffer<'d> {
    id: al::ALuint,
    _device: PhantomData<&'d AudioDevice>,
}

impl Buffer<'_> {
    /// 上传交错的PCM16字节数据
    ///
    /// 数据长度必须是整帧且不超过 `i32::MAX` 字节。
    pub fn upload(&self, format: BufferFormat, data: &[u8], sample_rate: i32) -> SndResult<()> {
        if data.len() % format.bytes_per_frame() != 0 {
            return Err(SndError::InvalidInput(format!(
                "{} bytes is not a whole number of {format:?} frames",
                data.len()
            )));
        }
        let size = al::ALsizei::try_from(data.len()).map_err(|_| {
            SndError::InvalidInput(format!("{} bytes exceeds OpenAL buffer limit", data.len()))
        })?;

        // SAFETY: data 在调用期间有效，OpenAL 会复制数据
        unsafe {
            al::alBufferData(
                self.id,
                format.as_raw(),
                data.as_ptr().cast(),
                size,
                sample_rate,
            )
        };
        check_al_error("alBufferData")
    }
}

impl Drop for Buffer<'_> {
    fn drop(&mut self) {
        // SAFETY: id 来自 alGenBuffers，只删除一次
        unsafe { al::alDeleteBuffers(1, &self.id) };
        if let Err(e) = check_al_error("alDeleteBuffers") {
            warn!("{e}");
        }
    }
}

/// 读取并清除 OpenAL 错误状态
fn check_al_error(call: &str) -> SndResult<()> {
    // SAFETY: 无参数
    let code = unsafe { al::alGetError() };
    if code == al::AL_NO_ERROR {
        Ok(())
    } else {
        Err(SndError::AudioOutput(format!("{call}: {}", al_error_name(code))))
    }
}

fn al_error_name(code: al::ALenum) -> String {
    match code {
        al::AL_INVALID_NAME => "AL_INVALID_NAME".to_string(),
        al::AL_INVALID_ENUM => "AL_INVALID_ENUM".to_string(),
        al::AL_INVALID_VALUE => "AL_INVALID_VALUE".to_string(),
        al::AL_INVALID_OPERATION => "AL_INVALID_OPERATION".to_string(),
        al::AL_OUT_OF_MEMORY => "AL_OUT_OF_MEMORY".to_string(),
        other => format!("0x{other:04X}"),
    }
}
