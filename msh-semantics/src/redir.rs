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

//! Redirection application
//!
//! Applying a [`Redirect`] opens the target (deferred until now), records
//! the new descriptor in the caller's close-later list, and duplicates it
//! onto the in-process descriptor. In a forked child nothing needs to be
//! undone; a built-in running in the shell process brackets the
//! application with a [`SavedFds`] guard that restores the three standard
//! descriptors afterwards.

use msh_env::system;
use msh_syntax::redir::{Redirect, RedirKind, Redirectee};
use nix::errno::Errno;
use nix::libc;
use std::ffi::CString;
use std::os::fd::RawFd;
use thiserror::Error;

/// Error applying a redirection
///
/// The enclosing simple command fails without executing its program.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RedirError {
    #[error("cannot open {path}: {errno}")]
    Open { path: String, errno: Errno },

    #[error("cannot redirect: {0}")]
    Dup(Errno),
}

/// Copies of the three standard descriptors, for in-process built-ins
#[derive(Debug)]
pub struct SavedFds {
    saved: [RawFd; 3],
}

impl SavedFds {
    /// Duplicates descriptors 0, 1 and 2 for later restoration.
    pub fn save() -> Result<SavedFds, Errno> {
        let mut saved = [-1; 3];
        for (fd, slot) in saved.iter_mut().enumerate() {
            match system::dup(fd as RawFd) {
                Ok(copy) => *slot = copy,
                Err(errno) => {
                    for &copy in &saved {
                        if copy >= 0 {
                            system::close(copy);
                        }
                    }
                    return Err(errno);
                }
            }
        }
        Ok(SavedFds { saved })
    }

    /// Restores the standard descriptors and closes every descriptor the
    /// redirections opened.
    pub fn restore(self, opened: &[RawFd]) {
        for (fd, saved) in self.saved.into_iter().enumerate() {
            let _ = system::dup2(saved, fd as RawFd);
            system::close(saved);
        }
        for &fd in opened {
            system::close(fd);
        }
    }
}

fn open_parameters(kind: RedirKind) -> (libc::c_int, libc::c_uint) {
    match kind {
        RedirKind::In => (libc::O_RDONLY, 0),
        RedirKind::Out => (libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC, 0o644),
        RedirKind::OutAppend => (libc::O_WRONLY | libc::O_CREAT | libc::O_APPEND, 0o644),
    }
}

/// Applies redirections in order.
///
/// Descriptors opened here are pushed onto `opened` when the caller needs
/// to close them later; a forked child passes `None` and lets `exec` or
/// exit clean up.
pub fn do_redirects(
    redirects: &[Redirect],
    mut opened: Option<&mut Vec<RawFd>>,
) -> Result<(), RedirError> {
    for redirect in redirects {
        let target_fd = match &redirect.target {
            Redirectee::Fd(fd) => *fd,
            Redirectee::Path(path) => {
                let (flags, mode) = open_parameters(redirect.kind);
                let c_path = CString::new(path.as_str()).map_err(|_| RedirError::Open {
                    path: path.clone(),
                    errno: Errno::EINVAL,
                })?;
                let fd = system::open(&c_path, flags, mode).map_err(|errno| RedirError::Open {
                    path: path.clone(),
                    errno,
                })?;
                if let Some(list) = opened.as_deref_mut() {
                    list.push(fd);
                }
                fd
            }
        };
        system::dup2(target_fd, redirect.fd).map_err(RedirError::Dup)?;
        if redirect.both_err_out {
            system::dup2(system::STDOUT_FILENO, system::STDERR_FILENO).map_err(RedirError::Dup)?;
        }
    }
    Ok(())
}
