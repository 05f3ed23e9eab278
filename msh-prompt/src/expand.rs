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

//! PS1 template expansion

use chrono::Local;

/// Prompt template used when `PS1` is not set.
pub const DEFAULT_PS1: &str = "\x1b[1;38;5;250m \\u \x1b[1;37m| \x1b[1;94m\\W\x1b[0m";

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn host_name() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => String::new(),
    }
}

fn working_directory() -> String {
    match std::env::current_dir() {
        Ok(path) => path.display().to_string(),
        Err(_) => String::new(),
    }
}

fn working_directory_basename() -> String {
    match std::env::current_dir() {
        Ok(path) => match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.display().to_string(),
        },
        Err(_) => String::new(),
    }
}

/// Expands a PS1 template into its corresponding values.
///
/// The supported escape sequences are:
///
/// | Escape | Replacement |
/// |--------|-------------|
/// | `\d` | the current date, `YYYY-MM-DD` |
/// | `\t` | the current time, `HH:MM:SS` |
/// | `\u` | the value of `USER` |
/// | `\h` | the host name |
/// | `\w` | the current working directory |
/// | `\W` | the basename of the working directory |
/// | `\n` | a newline |
/// | `\r` | a carriage return |
/// | `\s` | the value of `SHELL` |
/// | `\v` | the value of `VERSION` |
/// | `\$` | a literal `$` |
///
/// Any other escaped character yields the character itself; undefined
/// environment values expand empty.
#[must_use]
pub fn expand_ps1(ps1: &str) -> String {
    let mut result = String::new();
    let mut chars = ps1.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            result.push(c);
            break;
        };
        match escape {
            'd' => result.push_str(&Local::now().format("%Y-%m-%d").to_string()),
            't' => result.push_str(&Local::now().format("%H:%M:%S").to_string()),
            'u' => result.push_str(&env_or_empty("USER")),
            'h' => result.push_str(&host_name()),
            'w' => result.push_str(&working_directory()),
            'W' => result.push_str(&working_directory_basename()),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            's' => result.push_str(&env_or_empty("SHELL")),
            'v' => result.push_str(&env_or_empty("VERSION")),
            '$' => result.push('$'),
            other => result.push(other),
        }
    }
    result
}
