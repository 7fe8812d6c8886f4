//! Single subscriber subprocess.
//!
//! [`ScriptProcess`] owns a subscriber script with piped stdin/stdout/stderr. Stdout
//! lines are parsed as JSON [`ScriptCommand`] objects, and stderr lines are collected
//! for error reporting.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::error::ScriptError;
use crate::protocol::{ScriptCommand, ScriptMessage};

/// A subscriber subprocess speaking the JSON-lines protocol.
pub struct ScriptProcess {
    /// The child process handle, if still alive.
    child: Option<Child>,
    /// Writer to the child's stdin, if still open.
    stdin_writer: Option<ChildStdin>,
    /// Commands parsed from the child's stdout.
    command_buffer: Arc<Mutex<Vec<ScriptCommand>>>,
    /// Lines read from the child's stderr.
    error_buffer: Arc<Mutex<Vec<String>>>,
    _stdout_thread: Option<JoinHandle<()>>,
    _stderr_thread: Option<JoinHandle<()>>,
}

impl ScriptProcess {
    /// Spawn a subscriber with piped stdin/stdout/stderr.
    ///
    /// Starts background threads that parse stdout into [`ScriptCommand`]s and
    /// collect stderr lines.
    ///
    /// # Errors
    /// Returns [`ScriptError::Spawn`] if the command cannot be started.
    pub fn spawn(
        command: &str,
        args: &[&str],
        env_vars: &HashMap<String, String>,
    ) -> Result<Self, ScriptError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .envs(env_vars)
            .spawn()
            .map_err(|source| ScriptError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let stdin_writer = child.stdin.take();
        let stdout = child.stdout.take().ok_or(ScriptError::Capture("stdout"))?;
        let stderr = child.stderr.take().ok_or(ScriptError::Capture("stderr"))?;

        let command_buffer: Arc<Mutex<Vec<ScriptCommand>>> = Arc::new(Mutex::new(Vec::new()));
        let error_buffer: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let cmd_buf = Arc::clone(&command_buffer);
        let stdout_thread = std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let text = match line {
                    Ok(text) => text,
                    Err(e) => {
                        log::warn!("ScriptProcess: error reading stdout: {}", e);
                        break;
                    }
                };
                if text.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<ScriptCommand>(&text) {
                    Ok(cmd) => lock_recovering(&cmd_buf, "command_buffer").push(cmd),
                    Err(e) => log::warn!(
                        "ScriptProcess: failed to parse stdout line as ScriptCommand: {}: {:?}",
                        e,
                        text
                    ),
                }
            }
        });

        let err_buf = Arc::clone(&error_buffer);
        let stderr_thread = std::thread::spawn(move || {
            for line in BufReader::new(stderr).lines() {
                match line {
                    Ok(text) if text.is_empty() => continue,
                    Ok(text) => lock_recovering(&err_buf, "error_buffer").push(text),
                    Err(e) => {
                        log::warn!("ScriptProcess: error reading stderr: {}", e);
                        break;
                    }
                }
            }
        });

        log::info!("ScriptProcess: spawned '{}'", command);

        Ok(Self {
            child: Some(child),
            stdin_writer,
            command_buffer,
            error_buffer,
            _stdout_thread: Some(stdout_thread),
            _stderr_thread: Some(stderr_thread),
        })
    }

    /// Check without blocking whether the child process is still alive.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Whether the stdin writer is still open.
    pub fn has_stdin(&self) -> bool {
        self.stdin_writer.is_some()
    }

    /// Serialize a [`ScriptMessage`] and write it to the child's stdin as one line.
    ///
    /// A broken pipe closes the writer so later sends fail fast with
    /// [`ScriptError::StdinClosed`].
    pub fn send(&mut self, message: &ScriptMessage) -> Result<(), ScriptError> {
        let stdin = self
            .stdin_writer
            .as_mut()
            .ok_or(ScriptError::StdinClosed)?;

        let json = serde_json::to_string(message)?;

        let written = writeln!(stdin, "{}", json).and_then(|()| stdin.flush());
        if let Err(e) = written {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                self.stdin_writer.take();
            }
            return Err(e.into());
        }

        Ok(())
    }

    /// Drain the commands parsed from stdout since the last call.
    pub fn read_commands(&self) -> Vec<ScriptCommand> {
        lock_recovering(&self.command_buffer, "command_buffer")
            .drain(..)
            .collect()
    }

    /// Drain the stderr lines read since the last call.
    pub fn read_errors(&self) -> Vec<String> {
        lock_recovering(&self.error_buffer, "error_buffer")
            .drain(..)
            .collect()
    }

    /// Stop the subprocess.
    ///
    /// Drops stdin (sending EOF), kills the child if it is still running, and reaps it.
    pub fn stop(&mut self) {
        self.stdin_writer.take();

        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ScriptProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock_recovering<'a, T>(
    mutex: &'a Mutex<Vec<T>>,
    name: &str,
) -> std::sync::MutexGuard<'a, Vec<T>> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("{} mutex poisoned, recovering", name);
        e.into_inner()
    })
}
