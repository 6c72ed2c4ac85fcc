//! Child-process runner for the generation script.

use async_trait::async_trait;
use knobpanel_application::ports::script_runner::{LogSink, OutputStream, RunRequest, ScriptRunner};
use knobpanel_domain::{RunOutcome, SPAWN_FAILURE_EXIT_CODE};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default interpreter for the generation script.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Environment variable setting the output encoding of a Python child.
const IO_ENCODING_ENV: &str = "PYTHONIOENCODING";

const DEFAULT_IO_ENCODING: &str = "utf-8";

/// Runs `<interpreter> <args...> <script>` in the request's working
/// directory and forwards its output line by line.
#[derive(Debug, Clone)]
pub struct ProcessScriptRunner {
    interpreter: String,
    args: Vec<String>,
    io_encoding: String,
}

impl Default for ProcessScriptRunner {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER).with_args(["-u"])
    }
}

impl ProcessScriptRunner {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            args: Vec::new(),
            io_encoding: DEFAULT_IO_ENCODING.to_string(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Encoding exported to the child unless the caller's environment sets one.
    pub fn with_io_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.io_encoding = encoding.into();
        self
    }

    /// Absolute path of the interpreter, looked up on `PATH` when it is a bare name.
    fn resolve_interpreter(&self) -> Result<PathBuf, which::Error> {
        which::which(&self.interpreter)
    }

    fn command(&self, interpreter: PathBuf, request: &RunRequest) -> Command {
        let mut cmd = Command::new(interpreter);
        cmd.args(&self.args)
            .arg(&request.script)
            .current_dir(&request.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if std::env::var_os(IO_ENCODING_ENV).is_none() {
            cmd.env(IO_ENCODING_ENV, &self.io_encoding);
        }
        for (key, value) in &request.env {
            cmd.env(key, value);
        }

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }

    fn display_command(&self, request: &RunRequest) -> String {
        let mut parts = vec![self.interpreter.clone()];
        parts.extend(self.args.iter().cloned());
        parts.push(request.script.display().to_string());
        parts.join(" ")
    }
}

/// Forward every line of `reader` to `sink` until EOF.
///
/// Invalid UTF-8 is replaced, never fatal: the pipe must be drained or the
/// child dies on its next write.
async fn pump<R>(reader: R, stream: OutputStream, sink: Arc<dyn LogSink>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                sink.on_line(stream, line.trim_end_matches(['\r', '\n']));
            }
            Err(e) => {
                warn!("Stopped reading child {:?}: {}", stream, e);
                break;
            }
        }
    }
}

#[async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(&self, request: RunRequest, sink: Arc<dyn LogSink>) -> RunOutcome {
        let script_name = request
            .script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| request.script.display().to_string());
        let spawn_failure =
            |e: &dyn std::fmt::Display| RunOutcome::failed(format!("Failed to run {}: {}", script_name, e));

        let interpreter = match self.resolve_interpreter() {
            Ok(path) => path,
            Err(e) => return spawn_failure(&format!("{} ({})", e, self.interpreter)),
        };

        let command_line = self.display_command(&request);
        info!("Starting {} with: {}", script_name, command_line);
        sink.on_start(&command_line);

        let mut child = match self.command(interpreter, &request).spawn() {
            Ok(child) => child,
            Err(e) => return spawn_failure(&e),
        };

        let stdout = child
            .stdout
            .take()
            .map(|out| tokio::spawn(pump(out, OutputStream::Stdout, sink.clone())));
        let stderr = child
            .stderr
            .take()
            .map(|err| tokio::spawn(pump(err, OutputStream::Stderr, sink.clone())));

        let status = child.wait().await;

        for reader in [stdout, stderr].into_iter().flatten() {
            if let Err(e) = reader.await {
                warn!("Output reader task failed: {}", e);
            }
        }

        match status {
            Ok(status) => {
                let code = status.code().unwrap_or(SPAWN_FAILURE_EXIT_CODE);
                debug!("{} exited with status {}", script_name, status);
                RunOutcome::from_exit_code(&script_name, code)
            }
            Err(e) => spawn_failure(&e),
        }
    }
}
