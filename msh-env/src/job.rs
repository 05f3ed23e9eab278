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

//! Process tracking and reaping
//!
//! Every successful `fork` registers the child in the [`ProcessSet`]. A
//! `SIGCHLD` handler latches an atomic flag; the main loop polls the flag
//! before each prompt and reaps state changes with non-blocking `waitpid`,
//! so the process table is only ever mutated from normal control flow.
//! Foreground children are reaped synchronously with
//! [`Env::wait_for_process`]; the tail of a pipeline is collected with
//! [`Env::reap_children`].

use crate::semantics::{ExecFlag, ExitStatus};
use crate::Env;
use enumset::EnumSet;
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

#[doc(no_inline)]
pub use nix::unistd::Pid;

/// Latched by the `SIGCHLD` handler, consumed by [`ProcessSet::poll`].
static SIGCHLD_PENDING: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Installs the `SIGCHLD` handler.
///
/// Must be called once at startup, before the first `fork`.
pub fn init_job_control() -> std::io::Result<()> {
    let flag = SIGCHLD_PENDING.get_or_init(|| Arc::new(AtomicBool::new(false)));
    signal_hook::flag::register(signal_hook::consts::SIGCHLD, Arc::clone(flag))?;
    Ok(())
}

fn take_sigchld() -> bool {
    match SIGCHLD_PENDING.get() {
        Some(flag) => flag.swap(false, Ordering::Relaxed),
        None => false,
    }
}

/// Status of a tracked process
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProcessState {
    Running,
    Stopped,
    Done,
}

impl ProcessState {
    /// Name shown by the `jobs` built-in and the completion notices.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ProcessState::Running => "Running",
            ProcessState::Stopped => "Stopped",
            ProcessState::Done => "Done",
        }
    }
}

/// Record of one forked child
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Process {
    /// Current state of the process
    pub state: ProcessState,
    /// Executor flags the child was started with
    pub flags: EnumSet<ExecFlag>,
    /// Rendered command line, for job listings
    pub name: String,
}

/// Collection of processes started by the shell, in start order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcessSet {
    processes: Vec<(Pid, Process)>,
}

impl ProcessSet {
    /// Registers a newly forked child.
    pub fn add(&mut self, pid: Pid, flags: EnumSet<ExecFlag>, argv: &[String]) {
        let process = Process {
            state: ProcessState::Running,
            flags,
            name: argv.join(" "),
        };
        self.processes.push((pid, process));
    }

    /// Removes a process from the set.
    pub fn remove(&mut self, pid: Pid) {
        self.processes.retain(|&(p, _)| p != pid);
    }

    /// Updates the state of a tracked process. Unknown PIDs are ignored.
    pub fn set_state(&mut self, pid: Pid, state: ProcessState) {
        if let Some(entry) = self.processes.iter_mut().find(|entry| entry.0 == pid) {
            entry.1.state = state;
        }
    }

    fn flags_of(&self, pid: Pid) -> Option<EnumSet<ExecFlag>> {
        self.processes
            .iter()
            .find(|entry| entry.0 == pid)
            .map(|entry| entry.1.flags)
    }

    /// Number of processes currently in the `Running` state.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|(_, p)| p.state == ProcessState::Running)
            .count()
    }

    fn has_running_foreground(&self) -> bool {
        self.processes.iter().any(|(_, p)| {
            p.state == ProcessState::Running && !p.flags.contains(ExecFlag::Async)
        })
    }

    fn drop_running_foreground(&mut self) {
        self.processes.retain(|(_, p)| {
            p.state != ProcessState::Running || p.flags.contains(ExecFlag::Async)
        });
    }

    /// Returns an iterator over the tracked processes in start order.
    pub fn iter(&self) -> impl Iterator<Item = (Pid, &Process)> {
        self.processes.iter().map(|(pid, process)| (*pid, process))
    }

    /// Reaps pending child state changes without blocking.
    ///
    /// Does nothing unless `SIGCHLD` has been received since the last poll.
    pub fn poll(&mut self) {
        if !take_sigchld() {
            return;
        }
        let options = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED;
        loop {
            match waitpid(Pid::from_raw(-1), Some(options)) {
                Ok(WaitStatus::Exited(pid, _)) | Ok(WaitStatus::Signaled(pid, _, _)) => {
                    self.set_state(pid, ProcessState::Done)
                }
                Ok(WaitStatus::Stopped(pid, _)) => self.set_state(pid, ProcessState::Stopped),
                Ok(WaitStatus::StillAlive) | Err(_) => break,
                Ok(_) => {}
            }
        }
    }

    /// Prints a completion notice for every finished background job, then
    /// forgets all finished processes. Called before each prompt.
    pub fn notify_completed(&mut self) {
        let mut n = 0;
        for (_, process) in &self.processes {
            if process.state == ProcessState::Done && process.flags.contains(ExecFlag::Async) {
                n += 1;
                println!("[{}] {}\t{}", n, process.state.name(), process.name);
            }
        }
        self.processes
            .retain(|(_, p)| p.state != ProcessState::Done);
    }
}

impl Env {
    /// Waits for the given child to terminate and returns its exit status.
    ///
    /// A normally exited child yields its 8-bit exit code; a signaled child
    /// yields the signal number. The process is removed from the table.
    pub fn wait_for_process(&mut self, pid: Pid) -> ExitStatus {
        let status = loop {
            match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
                Ok(WaitStatus::Exited(_, code)) => break ExitStatus(code & 0xFF),
                Ok(WaitStatus::Signaled(_, signal, _)) => break ExitStatus(signal as c_int),
                Ok(WaitStatus::Stopped(_, _)) => self.jobs.set_state(pid, ProcessState::Stopped),
                Ok(_) => {}
                Err(Errno::EINTR) => {}
                Err(Errno::ECHILD) => break ExitStatus::FAILURE,
                Err(errno) => {
                    self.print_error(format_args!("wait: {}", errno.desc()));
                    break ExitStatus::UNKNOWN;
                }
            }
        };
        self.jobs.remove(pid);
        status
    }

    /// Collects every remaining foreground child with a blocking wait.
    ///
    /// Used at the end of a pipeline to reap the legs that were started with
    /// [`ExecFlag::ForkNoWait`]. Background children that happen to be
    /// reaped here are marked `Done` so the prompt notice still fires.
    pub fn reap_children(&mut self) {
        while self.jobs.has_running_foreground() {
            match waitpid(Pid::from_raw(-1), None) {
                Ok(WaitStatus::Exited(pid, _)) | Ok(WaitStatus::Signaled(pid, _, _)) => {
                    match self.jobs.flags_of(pid) {
                        Some(flags) if flags.contains(ExecFlag::Async) => {
                            self.jobs.set_state(pid, ProcessState::Done)
                        }
                        _ => self.jobs.remove(pid),
                    }
                }
                Ok(_) => {}
                Err(Errno::EINTR) => {}
                Err(Errno::ECHILD) => {
                    // The kernel has no more children; drop stale entries.
                    self.jobs.drop_running_foreground()
                }
                Err(errno) => {
                    self.print_error(format_args!("wait: {}", errno.desc()));
                    break;
                }
            }
        }
    }
}
