// src/exec/gateway.rs

//! External process gateway.
//!
//! Runs a named executable, accumulates its stdout and hands back a
//! [`CapturedOutput`]. It never fails: a process that cannot be spawned (not
//! installed, not executable) yields an empty capture, and a non-zero exit is
//! reported through `exit_code` for the caller to interpret.
//!
//! Argument values are never logged; secrets travel on stdin and are never
//! logged either.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// Everything a caller learns about one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Concatenated standard output (lossily decoded as UTF-8).
    pub stdout: String,
    /// Exit code, `None` if the process never ran or was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CapturedOutput {
    pub fn new(stdout: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: Some(exit_code),
        }
    }

    /// Capture used when the process could not be run at all.
    pub fn not_run() -> Self {
        Self::default()
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Future returned by [`ProcessGateway::run`].
///
/// It is `'static` so it can be detached onto its own task by the timeout
/// race and outlive the caller that started it.
pub type GatewayFuture = Pin<Box<dyn Future<Output = CapturedOutput> + Send + 'static>>;

/// Trait abstracting how external commands are run.
///
/// Production code uses [`RealProcessGateway`]; tests can provide scripted
/// implementations that never spawn a process.
pub trait ProcessGateway: Send + Sync + Debug {
    /// Run `executable`, writing `stdin` (if any) to its standard input and
    /// then closing it.
    fn run_with_stdin(
        &self,
        executable: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> GatewayFuture;

    fn run(&self, executable: &str, args: &[&str]) -> GatewayFuture {
        self.run_with_stdin(executable, args, None)
    }
}

/// Gateway backed by `tokio::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct RealProcessGateway;

impl ProcessGateway for RealProcessGateway {
    fn run_with_stdin(
        &self,
        executable: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> GatewayFuture {
        let executable = executable.to_string();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let stdin = stdin.map(str::to_string);

        Box::pin(async move {
            let started = Instant::now();
            match capture(&executable, &args, stdin).await {
                Ok(output) => {
                    info!(
                        executable = %executable,
                        arg_count = args.len(),
                        exit_code = ?output.exit_code,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "external command finished"
                    );
                    output
                }
                Err(err) => {
                    debug!(
                        executable = %executable,
                        arg_count = args.len(),
                        error = %err,
                        "external command could not be run; treating output as empty"
                    );
                    CapturedOutput::not_run()
                }
            }
        })
    }
}

async fn capture(
    executable: &str,
    args: &[String],
    input: Option<String>,
) -> Result<CapturedOutput> {
    debug!(
        executable = %executable,
        arg_count = args.len(),
        with_stdin = input.is_some(),
        "spawning external command"
    );

    // No kill_on_drop: a query that lost its race keeps running until it
    // exits on its own.
    let mut child = Command::new(executable)
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning '{executable}'"))?;

    // Feed stdin from its own task so a chatty child cannot deadlock us on
    // a full stdout pipe. Dropping the handle closes the stream.
    if let (Some(input), Some(mut writer)) = (input, child.stdin.take()) {
        let name = executable.to_string();
        tokio::spawn(async move {
            if let Err(err) = writer.write_all(input.as_bytes()).await {
                debug!(executable = %name, error = %err, "writing stdin failed");
            }
        });
    }

    // Always consume stderr so buffers don't fill; log at debug.
    if let Some(stderr) = child.stderr.take() {
        let name = executable.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(executable = %name, "stderr: {}", line);
            }
        });
    }

    let mut buffer = Vec::new();
    if let Some(mut stdout) = child.stdout.take() {
        let mut chunk = [0u8; 4096];
        loop {
            let n = stdout
                .read(&mut chunk)
                .await
                .with_context(|| format!("reading stdout of '{executable}'"))?;
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for '{executable}'"))?;

    Ok(CapturedOutput {
        stdout: String::from_utf8_lossy(&buffer).into_owned(),
        exit_code: status.code(),
    })
}
