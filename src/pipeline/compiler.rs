// External cursor compiler invocation. The compiler is a black box:
// it reads the generated alias config and emits the native cursor
// format. Only the artifact path comes back to the pipeline.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{CursorError, CursorResult};

/// The stock X11 cursor compiler.
pub const XCURSORGEN: &str = "xcursorgen";
/// The Windows `.cur`/`.ani` compiler.
pub const ANICURSORGEN: &str = "anicursorgen";

pub struct ExternalCompiler {
    program: String,
    timeout: Duration,
}

impl ExternalCompiler {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Runs `<program> <config> <out_path>` with `work_dir` as the
    /// working directory so the config's relative frame paths resolve.
    /// A hung compiler is killed once the timeout elapses. Stderr is
    /// drained on a separate thread while the child runs, so a verbose
    /// compiler can never fill the pipe and stall behind it.
    pub fn compile(&self, config: &Path, work_dir: &Path, out_path: &Path) -> CursorResult<PathBuf> {
        debug!(program = %self.program, config = %config.display(), out = %out_path.display(), "invoking compiler");

        let mut child = Command::new(&self.program)
            .arg(config)
            .arg(out_path)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CursorError::compiler(format!("failed to start '{}': {e}", self.program)))?;

        let drain = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                use std::io::Read;
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });
        let collect_stderr = |drain: Option<std::thread::JoinHandle<String>>| {
            drain
                .and_then(|handle| handle.join().ok())
                .unwrap_or_default()
        };

        let started = Instant::now();
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if started.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // the kill closes the pipe, so the drain terminates
                    let _ = collect_stderr(drain);
                    return Err(CursorError::compiler(format!(
                        "'{}' timed out after {:?}",
                        self.program, self.timeout
                    )));
                }
                None => std::thread::sleep(Duration::from_millis(20)),
            }
        };

        if !status.success() {
            let stderr = collect_stderr(drain);
            return Err(CursorError::compiler(format!(
                "'{}' exited with {status}: {}",
                self.program,
                stderr.trim()
            )));
        }

        if !out_path.exists() {
            return Err(CursorError::compiler(format!(
                "'{}' reported success but produced no artifact at '{}'",
                self.program,
                out_path.display()
            )));
        }

        Ok(out_path.to_path_buf())
    }
}
