use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::process::{Command, Stdio};

/// Number of trailing stderr lines kept for the failure message
const MAX_CAPTURED_LINES: usize = 50;

/// What a finished child process reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stderr: String,
}

impl SpawnOutcome {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            success: false,
            stderr: stderr.into(),
        }
    }
}

/// Starts a child process and waits for it to exit
pub trait ProcessSpawner {
    /// Run `program` with `args` in the current working directory.
    ///
    /// Returns `Err` only when the process could not be started at all.
    fn spawn(&self, program: &str, args: &[String]) -> io::Result<SpawnOutcome>;
}

/// Spawns real processes that share the terminal with the caller
#[derive(Debug, Clone)]
pub struct SystemSpawner {
    capture_stderr: bool,
}

impl SystemSpawner {
    pub fn new() -> Self {
        Self {
            capture_stderr: true,
        }
    }

    /// When enabled (the default), stderr is echoed live and its tail kept
    /// for diagnostics. The child then sees a pipe rather than a terminal on
    /// stderr, so git drops progress meters and colour there.
    ///
    /// When disabled, all three streams are inherited untouched and a
    /// failure carries only the exit status.
    pub fn with_capture_stderr(mut self, capture: bool) -> Self {
        self.capture_stderr = capture;
        self
    }

    /// Echo child stderr to our stderr while keeping the last lines
    fn tee_stderr<R: io::Read>(source: R) -> io::Result<String> {
        let mut reader = BufReader::new(source);
        let mut captured: VecDeque<String> = VecDeque::with_capacity(MAX_CAPTURED_LINES);
        let mut buf = Vec::new();
        let mut terminal = io::stderr();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            terminal.write_all(&buf)?;
            terminal.flush()?;

            if captured.len() == MAX_CAPTURED_LINES {
                captured.pop_front();
            }
            captured.push_back(String::from_utf8_lossy(&buf).trim_end().to_string());
        }

        Ok(captured.into_iter().collect::<Vec<_>>().join("\n"))
    }
}

impl Default for SystemSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, program: &str, args: &[String]) -> io::Result<SpawnOutcome> {
        let stderr = if self.capture_stderr {
            Stdio::piped()
        } else {
            Stdio::inherit()
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(stderr)
            .spawn()?;

        let captured = match child.stderr.take() {
            Some(pipe) => match Self::tee_stderr(pipe) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("Lost part of child stderr: {}", e);
                    String::new()
                }
            },
            None => String::new(),
        };

        let status = child.wait()?;

        Ok(SpawnOutcome {
            exit_code: status.code(),
            success: status.success(),
            stderr: captured,
        })
    }
}
