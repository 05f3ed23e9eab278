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

//! Command-line frontend for the msh shell
//!
//! The [`main`] function sets up the environment and runs either the
//! interactive read-eval loop (line editing and history are supplied by
//! `rustyline`) or, when invoked as `msh <file>`, the script through the
//! `source` built-in path. The process exit code mirrors the last
//! executed command's status.

pub mod startup;

use msh_env::Env;
use nix::sys::signal::{signal, SigHandler, Signal};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".msh_history"))
}

fn run_interactive(env: &mut Env) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            env.print_error(format_args!("cannot initialize line editor: {error}"));
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        // Pick up completed background jobs before prompting.
        env.jobs.poll();
        env.jobs.notify_completed();

        let prompt = msh_prompt::render(env);
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                    if let Some(path) = &history {
                        // The exit built-in terminates the process without
                        // returning here; flush per line.
                        let _ = editor.save_history(path);
                    }
                }
                msh_semantics::execute_line(env, &line);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(error) => {
                env.print_error(format_args!("{error}"));
                break;
            }
        }
    }
}

/// Entry point of the shell.
pub fn main() -> ! {
    let mut env = Env::new();
    startup::configure_environment(&mut env);

    // Rust starts with SIGPIPE ignored; restore the default so pipeline
    // children inherit the conventional disposition.
    unsafe {
        let _ = signal(Signal::SIGPIPE, SigHandler::SigDfl);
    }

    let mut args = std::env::args().skip(1);
    if let Some(script) = args.next() {
        // Script mode goes through the `source` built-in path.
        let argv = vec!["source".to_string(), script];
        let status = match env.builtins.get("source").copied() {
            Some(builtin) => (builtin.execute)(&mut env, &argv),
            None => msh_semantics::run_script(&mut env, &argv[1]),
        };
        env.exit_status = status;
    } else {
        run_interactive(&mut env);
    }

    std::process::exit(env.exit_status.0)
}
