// Shared helpers for integration tests.
//
// Provides a temporary directory holding YAML source files and a fluent
// builder so each test can set up its inputs without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use perms_migrate::commands::convert::{Report, load_all, write_commands};
use perms_migrate::config::{Dialect, Source};
use perms_migrate::logging::Logger;

/// An isolated set of input files backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding inputs and outputs.
    pub root: tempfile::TempDir,
    /// Input files in the order they were added.
    pub inputs: Vec<PathBuf>,
    /// Dialect used for conversion.
    pub dialect: Dialect,
}

impl IntegrationTestContext {
    /// Path of a file inside the context directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Convert all inputs in-process, returning the command text and report.
    pub fn convert(&self) -> (String, Report) {
        let sources = Source::from_args(&self.inputs);
        let acc = load_all(&sources, self.dialect, &Logger::new()).expect("load inputs");
        let mut buf = Vec::new();
        let report = write_commands(&acc, &mut buf).expect("write commands");
        (String::from_utf8(buf).expect("utf-8 output"), report)
    }

    /// Run the compiled binary writing to `output`, feeding `stdin` if given.
    pub fn run_binary(&self, output: &Path, stdin: Option<&str>) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_perms-migrate"));
        cmd.arg("--dialect")
            .arg(self.dialect.to_string())
            .arg(output)
            .args(&self.inputs)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        run_with_stdin(cmd, stdin)
    }
}

/// Spawn `cmd`, optionally writing `stdin` to it, and wait for completion.
pub fn run_with_stdin(mut cmd: Command, stdin: Option<&str>) -> Output {
    use std::io::Write as _;

    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    let mut child = cmd.spawn().expect("spawn perms-migrate");
    if let Some(text) = stdin {
        let mut pipe = child.stdin.take().expect("stdin pipe");
        pipe.write_all(text.as_bytes()).expect("write stdin");
    }
    child.wait_with_output().expect("wait for perms-migrate")
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with no inputs using the PermissionsEx dialect.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext {
                root: tempfile::tempdir().expect("create temp dir"),
                inputs: Vec::new(),
                dialect: Dialect::PermissionsEx,
            },
        }
    }

    /// Select the input dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.ctx.dialect = dialect;
        self
    }

    /// Write `content` to `filename` and append it to the input list.
    pub fn with_source(mut self, filename: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join(filename);
        std::fs::write(&path, content).expect("write source file");
        self.ctx.inputs.push(path);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
