// This file is part of msh, a POSIX-style command shell.
// Copyright (C) 2025 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Raw file-descriptor helpers
//!
//! The executor remaps descriptors across `fork` with plain `dup2`/`open`
//! calls; the descriptors deliberately outlive any owning wrapper, so these
//! helpers work on [`RawFd`] directly and retry on `EINTR` where the call
//! can be interrupted.

use nix::errno::Errno;
use nix::libc;
use std::ffi::CStr;
use std::os::fd::RawFd;

#[doc(no_inline)]
pub use nix::libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};

/// Creates a pipe and returns `(reader, writer)`.
pub fn pipe() -> Result<(RawFd, RawFd), Errno> {
    let mut fds = [0 as libc::c_int; 2];
    Errno::result(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
    Ok((fds[0], fds[1]))
}

/// Duplicates a descriptor onto the lowest free descriptor number.
pub fn dup(fd: RawFd) -> Result<RawFd, Errno> {
    loop {
        match Errno::result(unsafe { libc::dup(fd) }) {
            Err(Errno::EINTR) => (),
            other => return other,
        }
    }
}

/// Duplicates `from` onto `to`, closing whatever `to` referred to.
pub fn dup2(from: RawFd, to: RawFd) -> Result<RawFd, Errno> {
    loop {
        match Errno::result(unsafe { libc::dup2(from, to) }) {
            Err(Errno::EINTR) => (),
            other => return other,
        }
    }
}

/// Closes a descriptor, ignoring errors.
pub fn close(fd: RawFd) {
    loop {
        match Errno::result(unsafe { libc::close(fd) }) {
            Err(Errno::EINTR) => (),
            _ => return,
        }
    }
}

/// Opens a file with the given raw flags and creation mode.
pub fn open(path: &CStr, flags: libc::c_int, mode: libc::c_uint) -> Result<RawFd, Errno> {
    Errno::result(unsafe { libc::open(path.as_ptr(), flags, mode) })
}

/// Reads from a descriptor into the buffer.
///
/// `EINTR` is returned to the caller; retry loops live at the call site.
pub fn read(fd: RawFd, buffer: &mut [u8]) -> Result<usize, Errno> {
    let count = Errno::result(unsafe {
        libc::read(fd, buffer.as_mut_ptr().cast(), buffer.len())
    })?;
    Ok(count as usize)
}
