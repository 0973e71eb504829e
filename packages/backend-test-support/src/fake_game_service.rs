//! A scriptable stand-in for the external game process.
//!
//! Writes a small POSIX shell script into a temp directory. Run it with `sh`
//! as the interpreter: every invocation records its argv (script path first,
//! one entry per line) and replays the configured stdout, stderr and exit code.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct FakeGameService {
    dir: TempDir,
}

impl FakeGameService {
    /// Create a fake that exits 0 with `{}` on stdout.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir for fake game service");
        let fake = Self { dir };
        fake.respond(0, "{}", "");
        fake
    }

    /// Interpreter to configure the backend with.
    pub fn interpreter(&self) -> &'static str {
        "sh"
    }

    pub fn script_path(&self) -> PathBuf {
        self.dir.path().join("game_service.sh")
    }

    /// Exit 0 and print `stdout`.
    pub fn respond_ok(&self, stdout: &str) {
        self.respond(0, stdout, "");
    }

    /// Replace the scripted behavior for subsequent invocations.
    pub fn respond(&self, exit_code: i32, stdout: &str, stderr: &str) {
        let root = self.dir.path();
        fs::write(root.join("stdout.txt"), stdout).expect("write fake stdout");
        fs::write(root.join("stderr.txt"), stderr).expect("write fake stderr");

        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$0\" \"$@\" > '{args}'\n\
             cat '{stdout}'\n\
             cat '{stderr}' >&2\n\
             exit {exit_code}\n",
            args = quote_path(&root.join("args.txt")),
            stdout = quote_path(&root.join("stdout.txt")),
            stderr = quote_path(&root.join("stderr.txt")),
        );
        fs::write(self.script_path(), script).expect("write fake game script");
    }

    /// Argv of the last invocation as seen by the script: the script path,
    /// then every argument after it.
    pub fn recorded_args(&self) -> Vec<String> {
        let path = self.dir.path().join("args.txt");
        match fs::read_to_string(path) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// True once the script has run at least once.
    pub fn was_invoked(&self) -> bool {
        self.dir.path().join("args.txt").exists()
    }
}

impl Default for FakeGameService {
    fn default() -> Self {
        Self::new()
    }
}

fn quote_path(path: &Path) -> String {
    path.display().to_string().replace('\'', r"'\''")
}
