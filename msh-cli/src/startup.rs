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

//! Shell startup
//!
//! Prepares the environment before the first prompt: imports the process
//! environment into the variable table, sets `SHELL` and `VERSION`,
//! prepends the external-binaries directory to `PATH` when one was
//! configured at build time, installs the built-in registry, and arms the
//! `SIGCHLD` handler.

use msh_env::Env;

/// Directory of companion external binaries, baked in by the build.
const EXTERNAL_BIN_PATH: Option<&str> = option_env!("MSH_EXTERNAL_BIN_PATH");

/// Populates a fresh environment for this shell process.
pub fn configure_environment(env: &mut Env) {
    env.variables.extend_env(std::env::vars());

    let shell = std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "msh".to_string());
    env.variables.set("SHELL", shell.as_str());
    std::env::set_var("SHELL", &shell);

    let version = env!("CARGO_PKG_VERSION");
    env.variables.set("VERSION", version);
    std::env::set_var("VERSION", version);

    if let Some(bin_dir) = EXTERNAL_BIN_PATH {
        let path = match std::env::var("PATH") {
            Ok(current) => format!("{bin_dir}:{current}"),
            Err(_) => bin_dir.to_string(),
        };
        env.variables.set("PATH", path.as_str());
        std::env::set_var("PATH", &path);
    }

    env.builtins = msh_builtin::builtins();

    if let Err(error) = msh_env::job::init_job_control() {
        env.print_error(format_args!("failed to set SIGCHLD handler: {error}"));
    }
}
