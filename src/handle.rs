use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::event::InputEvent;

/// The raw operations a device file supports.
///
/// `UinputFile` talks to the kernel; tests substitute a recorder.
pub(crate) trait Backend: Send {
    fn control(&mut self, request: u64, arg: libc::c_ulong) -> io::Result<()>;
    fn control_read(&mut self, request: u64, buf: &mut [u8]) -> io::Result<()>;
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// An open uinput character device.
struct UinputFile {
    file: File,
}

impl Backend for UinputFile {
    fn control(&mut self, request: u64, arg: libc::c_ulong) -> io::Result<()> {
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), request as _, arg) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn control_read(&mut self, request: u64, buf: &mut [u8]) -> io::Result<()> {
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), request as _, buf.as_mut_ptr()) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.file.write(bytes)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        // File's Drop swallows close(2) errors, so close the descriptor by hand
        let fd = self.file.into_raw_fd();
        if unsafe { libc::close(fd) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

/// Sole owner of the open uinput descriptor. Every ioctl and frame write
/// goes through here.
pub struct DeviceFile {
    backend: Box<dyn Backend>,
    path: PathBuf,
}

impl DeviceFile {
    /// Open `path` write-only and non-blocking.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyPath);
        }

        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    Error::PathNotFound {
                        path: path.to_path_buf(),
                        source,
                    }
                } else {
                    Error::OpenFailure {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;

        debug!("Opened {} (fd {})", path.display(), file.as_raw_fd());

        Ok(Self {
            backend: Box::new(UinputFile { file }),
            path: path.to_path_buf(),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_backend(backend: Box<dyn Backend>, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Issue one ioctl with an integer argument.
    pub fn control(&mut self, request: u64, arg: libc::c_ulong) -> io::Result<()> {
        trace!("ioctl {:#x}({})", request, arg);
        self.backend.control(request, arg)
    }

    /// Issue one ioctl that fills `buf`.
    pub fn control_read(&mut self, request: u64, buf: &mut [u8]) -> io::Result<()> {
        trace!("ioctl {:#x}(<{} byte buffer>)", request, buf.len());
        self.backend.control_read(request, buf)
    }

    /// Write a buffer in one call. Anything short of the full length is an error.
    pub fn write_all_once(&mut self, bytes: &[u8]) -> io::Result<()> {
        let written = self.backend.write(bytes)?;
        if written != bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", written, bytes.len()),
            ));
        }
        Ok(())
    }

    pub fn write_frame(&mut self, event: &InputEvent) -> Result<()> {
        trace!(
            "event type={:#x} code={:#x} value={}",
            event.event_type, event.code, event.value
        );
        self.write_all_once(&event.to_bytes())
            .map_err(|source| Error::Write {
                event_type: event.event_type,
                code: event.code,
                source,
            })
    }

    /// Release the descriptor. Consumes the handle, so it can only happen once.
    pub fn close(self) -> io::Result<()> {
        debug!("Closing {}", self.path.display());
        self.backend.close()
    }
}

impl std::fmt::Debug for DeviceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceFile").field("path", &self.path).finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// What a recorder saw, shared with the test after the backend moves into a device.
    #[derive(Debug, Default)]
    pub struct Log {
        pub controls: Vec<(u64, libc::c_ulong)>,
        pub written: Vec<Vec<u8>>,
        pub closed: bool,
        pub fail_control: Option<(u64, Option<libc::c_ulong>)>,
        pub fail_close: bool,
        pub short_write: bool,
        pub sysname: Vec<u8>,
    }

    impl Log {
        /// All frame writes decoded, skipping the descriptor write.
        pub fn frames(&self) -> Vec<InputEvent> {
            self.written
                .iter()
                .filter(|w| w.len() == InputEvent::SIZE)
                .filter_map(|w| InputEvent::from_bytes(w))
                .collect()
        }

        pub fn frame_bytes(&self) -> Vec<u8> {
            self.written
                .iter()
                .filter(|w| w.len() == InputEvent::SIZE)
                .flatten()
                .copied()
                .collect()
        }

        pub fn requests(&self) -> Vec<u64> {
            self.controls.iter().map(|&(r, _)| r).collect()
        }
    }

    pub struct Recorder {
        pub log: Arc<Mutex<Log>>,
    }

    impl Recorder {
        pub fn new() -> (Self, Arc<Mutex<Log>>) {
            let log = Arc::new(Mutex::new(Log::default()));
            (Self { log: Arc::clone(&log) }, log)
        }
    }

    impl Backend for Recorder {
        fn control(&mut self, request: u64, arg: libc::c_ulong) -> io::Result<()> {
            let mut log = self.log.lock().unwrap();
            if let Some((req, code)) = log.fail_control {
                if req == request && code.is_none_or(|c| c == arg) {
                    return Err(io::Error::from_raw_os_error(libc::ENOTTY));
                }
            }
            log.controls.push((request, arg));
            Ok(())
        }

        fn control_read(&mut self, request: u64, buf: &mut [u8]) -> io::Result<()> {
            let mut log = self.log.lock().unwrap();
            if let Some((req, None)) = log.fail_control {
                if req == request {
                    return Err(io::Error::from_raw_os_error(libc::EINVAL));
                }
            }
            let name = log.sysname.clone();
            let n = name.len().min(buf.len());
            buf[..n].copy_from_slice(&name[..n]);
            log.controls.push((request, buf.len() as libc::c_ulong));
            Ok(())
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            let mut log = self.log.lock().unwrap();
            if log.short_write {
                return Ok(bytes.len() / 2);
            }
            log.written.push(bytes.to_vec());
            Ok(bytes.len())
        }

        fn close(self: Box<Self>) -> io::Result<()> {
            let mut log = self.log.lock().unwrap();
            log.closed = true;
            if log.fail_close {
                return Err(io::Error::from_raw_os_error(libc::EBADF));
            }
            Ok(())
        }
    }
}
