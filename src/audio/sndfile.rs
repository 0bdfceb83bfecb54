//! 声音文件句柄
//!
//! [`SndFile`] 独占一个原生 `SNDFILE*`，生命周期状态为
//! Unopened → Open → Closed，Closed 为终态。`close()` 是主要的释放手段，
//! `Drop` 只是兜底：任何退出路径（正常返回、提前返回、`?` 传播）都会释放。
//!
//! 句柄持有裸指针，因此既不是 `Send` 也不是 `Sync`，只能在创建它的线程上使用。

use std::ffi::{CStr, CString};
use std::fmt;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use libc::{c_char, c_double, c_float, c_int, c_short};
use tracing::{debug, warn};

use super::format;
use super::info::Info;
use crate::error::{self, SndError, SndResult};
use crate::ffi;

/// 打开模式，取值与 `SFM_*` 常量逐位一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 只读
    Read,
    /// 只写
    Write,
    /// 读写
    ReadWrite,
}

impl Mode {
    /// 对应的原生整数代码
    pub fn as_raw(self) -> c_int {
        match self {
            Mode::Read => ffi::SFM_READ,
            Mode::Write => ffi::SFM_WRITE,
            Mode::ReadWrite => ffi::SFM_RDWR,
        }
    }
}

/// 句柄状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Unopened,
    Open,
    Closed,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleState::Unopened => "unopened",
            HandleState::Open => "open",
            HandleState::Closed => "closed",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// 可按帧读写的样本类型
///
/// 每种类型对应一组 `sf_readf_*` / `sf_writef_*`。整数读取会被库缩放到
/// 目标位宽，例如16位文件经 `i32` 读取得到 `s << 16`。
pub trait Sample: Copy + Default + sealed::Sealed {
    /// # Safety
    /// `file` 必须是打开的句柄，`buf` 至少容纳 `frames × channels` 个样本。
    #[doc(hidden)]
    unsafe fn read_frames(
        file: *mut ffi::SNDFILE,
        buf: *mut Self,
        frames: ffi::sf_count_t,
    ) -> ffi::sf_count_t;

    /// # Safety
    /// `file` 必须是打开的句柄，`buf` 至少包含 `frames × channels` 个样本。
    #[doc(hidden)]
    unsafe fn write_frames(
        file: *mut ffi::SNDFILE,
        buf: *const Self,
        frames: ffi::sf_count_t,
    ) -> ffi::sf_count_t;
}

macro_rules! impl_sample {
    ($ty:ty, $c_ty:ty, $read:ident, $write:ident) => {
        impl Sample for $ty {
            unsafe fn read_frames(
                file: *mut ffi::SNDFILE,
                buf: *mut Self,
                frames: ffi::sf_count_t,
            ) -> ffi::sf_count_t {
                unsafe { ffi::$read(file, buf.cast::<$c_ty>(), frames) }
            }

            unsafe fn write_frames(
                file: *mut ffi::SNDFILE,
                buf: *const Self,
                frames: ffi::sf_count_t,
            ) -> ffi::sf_count_t {
                unsafe { ffi::$write(file, buf.cast::<$c_ty>(), frames) }
            }
        }
    };
}

impl_sample!(i16, c_short, sf_readf_short, sf_writef_short);
impl_sample!(i32, c_int, sf_readf_int, sf_writef_int);
impl_sample!(f32, c_float, sf_readf_float, sf_writef_float);
impl_sample!(f64, c_double, sf_readf_double, sf_writef_double);

/// 声音文件句柄
pub struct SndFile {
    info: Info,
    raw: Option<NonNull<ffi::SNDFILE>>,
    state: HandleState,
    path: Option<PathBuf>,
    mode: Option<Mode>,
}

impl SndFile {
    /// 创建未打开的句柄
    ///
    /// 写入模式下 `info` 描述期望的输出格式；读取模式下可传 `Info::default()`。
    pub fn new(info: Info) -> Self {
        Self {
            info,
            raw: None,
            state: HandleState::Unopened,
            path: None,
            mode: None,
        }
    }

    /// 以只读模式打开文件
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use sndfile::SndFile;
    ///
    /// let mut file = SndFile::open_read("song.flac")?;
    /// let samples = file.read_frames(file.info().frames)?;
    /// println!("{} samples", samples.len());
    /// # Ok::<(), sndfile::SndError>(())
    /// ```
    pub fn open_read<P: AsRef<Path>>(path: P) -> SndResult<Self> {
        Self::open_with(path, Mode::Read, Info::default())
    }

    /// 以指定模式和描述信息打开文件
    pub fn open_with<P: AsRef<Path>>(path: P, mode: Mode, info: Info) -> SndResult<Self> {
        let mut file = Self::new(info);
        file.open(path, mode)?;
        Ok(file)
    }

    /// 打开文件
    ///
    /// 只读模式下格式代码在调用前强制清零（原生库拒绝非零格式），
    /// 成功后描述信息由库回填。失败时句柄保持 Unopened，不会处于半打开状态。
    /// 对已打开或已关闭的句柄调用返回 [`SndError::ResourceMisuse`]。
    pub fn open<P: AsRef<Path>>(&mut self, path: P, mode: Mode) -> SndResult<()> {
        if self.state != HandleState::Unopened {
            return Err(error::misuse("open", self.state));
        }

        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;

        let mut raw_info = self.info.to_native();
        if mode == Mode::Read {
            raw_info.format = 0;
        }

        // SAFETY: c_path 以NUL结尾且在调用期间存活，raw_info 是有效的可写结构
        let handle = unsafe { ffi::sf_open(c_path.as_ptr(), mode.as_raw(), &mut raw_info) };
        let Some(handle) = NonNull::new(handle) else {
            let message = last_error();
            debug!(path = %path.display(), ?mode, %message, "sf_open failed");
            return Err(SndError::OpenFailure {
                path: path.to_path_buf(),
                message,
            });
        };

        self.info.fill_from_native(&raw_info);
        self.raw = Some(handle);
        self.state = HandleState::Open;
        self.path = Some(path.to_path_buf());
        self.mode = Some(mode);

        debug!(
            path = %path.display(),
            ?mode,
            frames = self.info.frames,
            sample_rate = self.info.sample_rate,
            channels = self.info.channels,
            format = %format::describe(self.info.format),
            "opened sound file"
        );
        Ok(())
    }

    /// 关闭句柄
    ///
    /// 可重复调用；对从未成功打开的句柄同样有效。之后句柄处于 Closed 终态。
    pub fn close(&mut self) {
        if let Some(handle) = self.raw.take() {
            // SAFETY: handle 来自成功的 sf_open，且 take() 保证只关闭一次
            let rc = unsafe { ffi::sf_close(handle.as_ptr()) };
            if rc != ffi::SF_ERR_NO_ERROR {
                warn!(code = rc, path = ?self.path, "sf_close reported an error");
            } else {
                debug!(path = ?self.path, "closed sound file");
            }
        }
        self.state = HandleState::Closed;
    }

    /// 描述信息
    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == HandleState::Open
    }

    /// 打开时使用的路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    // ==================== 读取 ====================

    /// 读取最多 `frames` 帧16位样本（交错排列）
    ///
    /// 请求帧数先按 `info().frames` 截断；实际读到的帧数可能更少，
    /// 返回长度始终为 `实际帧数 × 声道数`。读取推进原生库内部游标。
    ///
    /// # 错误
    ///
    /// * `SndError::EndOfData` - 没有更多数据
    /// * `SndError::ReadFailure` - 原生库报告读取错误
    /// * `SndError::ResourceMisuse` - 句柄未打开
    pub fn read_frames(&mut self, frames: u64) -> SndResult<Vec<i16>> {
        self.read_frames_as::<i16>(frames)
    }

    /// 读取最多 `frames` 帧32位整数样本
    pub fn read_frames_i32(&mut self, frames: u64) -> SndResult<Vec<i32>> {
        self.read_frames_as::<i32>(frames)
    }

    /// 读取最多 `frames` 帧32位浮点样本（[-1.0, 1.0]）
    pub fn read_frames_f32(&mut self, frames: u64) -> SndResult<Vec<f32>> {
        self.read_frames_as::<f32>(frames)
    }

    /// 读取最多 `frames` 帧64位浮点样本
    pub fn read_frames_f64(&mut self, frames: u64) -> SndResult<Vec<f64>> {
        self.read_frames_as::<f64>(frames)
    }

    /// 按样本类型读取
    ///
    /// 请求0帧直接返回空缓冲区，不调用原生库。
    pub fn read_frames_as<T: Sample>(&mut self, frames: u64) -> SndResult<Vec<T>> {
        let handle = self.require_open("read")?;
        if frames == 0 {
            return Ok(Vec::new());
        }

        let frames = frames.min(self.info.frames);
        if frames == 0 {
            return Err(SndError::EndOfData);
        }

        let channels = self.info.channels_usize();
        let mut buf = alloc_read_buffer::<T>(&self.info, frames)?;
        // 帧数由缓冲区实际长度反推，原生库写入量不会超过 buf
        let requested = ffi::sf_count_t::try_from(buf.len() / channels)
            .map_err(|e| error::invalid_input("frame count out of range", e))?;

        // SAFETY: buf 恰好容纳 requested × channels 个样本，handle 处于打开状态
        let read = unsafe { T::read_frames(handle.as_ptr(), buf.as_mut_ptr(), requested) };
        if read <= 0 {
            return Err(self.zero_read_error(handle));
        }

        buf.truncate(read as usize * channels);
        debug!(requested, read, "read frames");
        Ok(buf)
    }

    /// 读取全部剩余帧（请求 `info().frames`）
    ///
    /// 文件没有任何帧时返回 [`SndError::EndOfData`]，而不是空缓冲区。
    pub fn read_all(&mut self) -> SndResult<Vec<i16>> {
        let samples = self.read_frames(self.info.frames)?;
        if samples.is_empty() {
            return Err(SndError::EndOfData);
        }
        Ok(samples)
    }

    // ==================== 写入 ====================

    /// 写入交错的16位样本，返回写入帧数
    pub fn write_frames(&mut self, samples: &[i16]) -> SndResult<u64> {
        self.write_frames_as(samples)
    }

    pub fn write_frames_i32(&mut self, samples: &[i32]) -> SndResult<u64> {
        self.write_frames_as(samples)
    }

    pub fn write_frames_f32(&mut self, samples: &[f32]) -> SndResult<u64> {
        self.write_frames_as(samples)
    }

    pub fn write_frames_f64(&mut self, samples: &[f64]) -> SndResult<u64> {
        self.write_frames_as(samples)
    }

    /// 按样本类型写入
    ///
    /// 样本数必须是声道数的整数倍；少写视为失败。
    pub fn write_frames_as<T: Sample>(&mut self, samples: &[T]) -> SndResult<u64> {
        let handle = self.require_open("write")?;

        let channels = self.info.channels_usize();
        if channels == 0 || samples.len() % channels != 0 {
            return Err(SndError::InvalidInput(format!(
                "{} samples is not a whole number of {channels}-channel frames",
                samples.len()
            )));
        }

        let frames = (samples.len() / channels) as ffi::sf_count_t;
        if frames == 0 {
            return Ok(0);
        }

        // SAFETY: samples 恰好包含 frames × channels 个样本
        let written = unsafe { T::write_frames(handle.as_ptr(), samples.as_ptr(), frames) };
        if written < frames {
            return Err(SndError::WriteFailure(format!(
                "wrote {written} of {frames} frames: {}",
                handle_error(handle)
            )));
        }

        debug!(frames = written, "wrote frames");
        Ok(written as u64)
    }

    /// 把缓冲中的数据刷新到磁盘
    pub fn sync(&mut self) -> SndResult<()> {
        let handle = self.require_open("sync")?;
        // SAFETY: handle 处于打开状态
        unsafe { ffi::sf_write_sync(handle.as_ptr()) };
        Ok(())
    }

    // ==================== 定位 ====================

    /// 移动读写游标（单位：帧），返回新的绝对帧位置
    pub fn seek(&mut self, pos: SeekFrom) -> SndResult<u64> {
        let handle = self.require_open("seek")?;

        let (offset, whence) = match pos {
            SeekFrom::Start(n) => (
                ffi::sf_count_t::try_from(n)
                    .map_err(|e| error::invalid_input("seek offset out of range", e))?,
                libc::SEEK_SET,
            ),
            SeekFrom::Current(n) => (n, libc::SEEK_CUR),
            SeekFrom::End(n) => (n, libc::SEEK_END),
        };

        // SAFETY: handle 处于打开状态
        let position = unsafe { ffi::sf_seek(handle.as_ptr(), offset, whence) };
        if position < 0 {
            return Err(SndError::SeekFailure(handle_error(handle)));
        }
        Ok(position as u64)
    }

    // ==================== 内部辅助 ====================

    fn require_open(&self, operation: &'static str) -> SndResult<NonNull<ffi::SNDFILE>> {
        match (self.state, self.raw) {
            (HandleState::Open, Some(handle)) => Ok(handle),
            (state, _) => Err(error::misuse(operation, state)),
        }
    }

    /// 读到0帧：原生错误状态干净即数据结束，否则为读取失败
    fn zero_read_error(&self, handle: NonNull<ffi::SNDFILE>) -> SndError {
        // SAFETY: handle 处于打开状态
        let code = unsafe { ffi::sf_error(handle.as_ptr()) };
        if code == ffi::SF_ERR_NO_ERROR {
            SndError::EndOfData
        } else {
            SndError::ReadFailure(handle_error(handle))
        }
    }
}

impl Drop for SndFile {
    fn drop(&mut self) {
        if self.raw.is_some() {
            debug!(path = ?self.path, "closing sound file on drop");
        }
        self.close();
    }
}

impl fmt::Debug for SndFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SndFile")
            .field("info", &self.info)
            .field("state", &self.state)
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}

// ==================== 全局函数 ====================

/// 原生库最近一次全局错误（例如最近一次失败的 `sf_open`）
pub fn last_error() -> String {
    // SAFETY: 传入空指针时返回库内部的静态/线程局部字符串
    native_string(unsafe { ffi::sf_strerror(std::ptr::null_mut()) })
}

/// libsndfile 版本字符串，例如 `libsndfile-1.2.2`
pub fn version() -> String {
    // SAFETY: 返回静态字符串
    native_string(unsafe { ffi::sf_version_string() })
}

/// 按 `info` 的声道数分配 `frames` 帧的读取缓冲区
///
/// 样本数溢出或内存不足时返回错误，不会 panic。
fn alloc_read_buffer<T: Sample>(info: &Info, frames: u64) -> SndResult<Vec<T>> {
    if info.channels_usize() == 0 {
        return Err(SndError::InvalidInput(
            "cannot read from a file with 0 channels".to_string(),
        ));
    }
    let samples = info.samples_for(frames).ok_or_else(|| {
        SndError::InvalidInput(format!(
            "{frames} frames × {} channels exceeds addressable memory",
            info.channels
        ))
    })?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(samples)
        .map_err(|e| error::invalid_input(&format!("cannot allocate {frames} frames"), e))?;
    buf.resize(samples, T::default());
    Ok(buf)
}

fn handle_error(handle: NonNull<ffi::SNDFILE>) -> String {
    // SAFETY: handle 处于打开状态
    native_string(unsafe { ffi::sf_strerror(handle.as_ptr()) })
}

fn native_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: 非空且由原生库保证以NUL结尾
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

fn path_to_cstring(path: &Path) -> SndResult<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path.to_string_lossy().into_owned().into_bytes();

    CString::new(bytes).map_err(|e| error::invalid_input("path contains an interior NUL byte", e))
}
