//! Partial-write-safe vectored output.
//!
//! [`write_all_vectored`] pushes an ordered list of byte segments through a
//! [`VectoredOutput`] until every byte has been accepted. Short writes
//! advance the segment list in place, `WouldBlock` parks the caller until
//! the descriptor is writable again, and `Interrupted` is retried at once.
//! Nothing is ever re-sent or skipped, so the bytes on the other side match
//! a single uninterrupted write.

use std::io::{self, IoSlice};
use std::os::fd::{AsRawFd, BorrowedFd};

/// A write primitive that accepts several buffers at once.
///
/// Implemented for [`BorrowedFd`] with `writev(2)` and `poll(2)`. Hosts and
/// tests may provide their own implementation.
pub trait VectoredOutput {
    /// Write some prefix of `bufs`, returning how many bytes were accepted.
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize>;

    /// Block until the output can accept more bytes.
    ///
    /// Called after `write_vectored` reported `WouldBlock`. There is no
    /// timeout.
    fn wait_writable(&mut self) -> io::Result<()>;
}

impl VectoredOutput for BorrowedFd<'_> {
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let cnt = bufs.len().min(libc::c_int::MAX as usize) as libc::c_int;
        // IoSlice is ABI compatible with iovec on unix.
        let ret = unsafe {
            libc::writev(
                self.as_raw_fd(),
                bufs.as_ptr() as *const libc::iovec,
                cnt,
            )
        };
        if ret < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(ret as usize)
        }
    }

    fn wait_writable(&mut self) -> io::Result<()> {
        let mut pfd = libc::pollfd {
            fd: self.as_raw_fd(),
            events: libc::POLLOUT,
            revents: 0,
        };
        let ret = unsafe { libc::poll(&mut pfd, 1, -1) };
        if ret < 0 {
            let err = io::Error::last_os_error();
            // a signal during the wait just sends us back to writev
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<T: VectoredOutput + ?Sized> VectoredOutput for &mut T {
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        (**self).write_vectored(bufs)
    }

    fn wait_writable(&mut self) -> io::Result<()> {
        (**self).wait_writable()
    }
}

/// Remaining segments of one logical write.
///
/// Fully consumed segments are dropped from the front; a partially
/// consumed one has its start advanced.
#[derive(Debug)]
struct Segments<'a> {
    bufs: Vec<&'a [u8]>,
    head: usize,
}

impl<'a> Segments<'a> {
    fn new(segments: &[&'a [u8]]) -> Self {
        Self {
            bufs: segments.iter().copied().filter(|s| !s.is_empty()).collect(),
            head: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.head == self.bufs.len()
    }

    fn remaining(&self) -> usize {
        self.bufs[self.head..].iter().map(|s| s.len()).sum()
    }

    fn io_slices(&self) -> Vec<IoSlice<'a>> {
        self.bufs[self.head..].iter().copied().map(IoSlice::new).collect()
    }

    fn advance(&mut self, mut n: usize) {
        while n > 0 && !self.is_empty() {
            let seg = self.bufs[self.head];
            if n >= seg.len() {
                n -= seg.len();
                self.head += 1;
            } else {
                self.bufs[self.head] = &seg[n..];
                n = 0;
            }
        }
    }
}

/// Write every segment, in order, to `out`.
///
/// Returns the total number of bytes written. On error, a prefix of the
/// concatenated segments may already have been delivered, but no byte is
/// ever written twice.
///
/// # Errors
/// - `ErrorKind::WriteZero` if the output accepted zero bytes while data
///   remained (peer gone or no space left).
/// - Any error from the output other than `WouldBlock` or `Interrupted`.
pub fn write_all_vectored<W>(out: &mut W, segments: &[&[u8]]) -> io::Result<usize>
where
    W: VectoredOutput + ?Sized,
{
    let mut segs = Segments::new(segments);
    let total = segs.remaining();

    while !segs.is_empty() {
        let iov = segs.io_slices();
        match out.write_vectored(&iov) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("wrote 0 of {} remaining bytes", segs.remaining()),
                ));
            }
            Ok(n) => segs.advance(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                log::trace!("output would block, waiting for POLLOUT");
                out.wait_writable()?;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(total)
}
