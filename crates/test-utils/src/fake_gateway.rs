use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use travis_to_heroku::exec::{CapturedOutput, GatewayFuture, ProcessGateway};

#[derive(Debug, Clone)]
enum Script {
    Respond(CapturedOutput),
    RespondAfter(CapturedOutput, Duration),
    Hang,
}

/// A scripted process gateway that:
/// - records every invocation as `"<executable> <args...>"`, and whatever
///   was written to stdin alongside it
/// - answers from a table keyed by the same string
/// - behaves like a missing executable for anything unscripted
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    scripts: Arc<Mutex<HashMap<String, Script>>>,
    calls: Arc<Mutex<Vec<String>>>,
    inputs: Arc<Mutex<Vec<Option<String>>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command: &str, stdout: &str, exit_code: i32) -> Self {
        self.script(command, Script::Respond(CapturedOutput::new(stdout, exit_code)))
    }

    /// Settle only after `delay`.
    pub fn respond_after(self, command: &str, stdout: &str, exit_code: i32, delay: Duration) -> Self {
        self.script(
            command,
            Script::RespondAfter(CapturedOutput::new(stdout, exit_code), delay),
        )
    }

    /// Never settle, like a CLI waiting for a login that will not come.
    pub fn hang(self, command: &str) -> Self {
        self.script(command, Script::Hang)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Stdin of each call, in call order.
    pub fn inputs(&self) -> Vec<Option<String>> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn was_called(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }

    fn script(self, command: &str, script: Script) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(command.to_string(), script);
        self
    }
}

impl ProcessGateway for FakeGateway {
    fn run_with_stdin(
        &self,
        executable: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> GatewayFuture {
        let mut key = executable.to_string();
        for arg in args {
            key.push(' ');
            key.push_str(arg);
        }

        self.calls.lock().unwrap().push(key.clone());
        self.inputs.lock().unwrap().push(stdin.map(str::to_string));
        let script = self.scripts.lock().unwrap().get(&key).cloned();

        Box::pin(async move {
            match script {
                Some(Script::Respond(output)) => output,
                Some(Script::RespondAfter(output, delay)) => {
                    tokio::time::sleep(delay).await;
                    output
                }
                Some(Script::Hang) => std::future::pending().await,
                None => CapturedOutput::not_run(),
            }
        })
    }
}
