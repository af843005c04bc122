//! Git CLI wrapper used to provision projects
//!
//! Shells out to the `git` executable rather than linking a git library, so
//! whatever credentials and proxies the user has configured apply.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::setup::provision::Toolchain;

/// [`Toolchain`] backed by the `git` command line tool
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .with_context(|| format!("failed to run {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} {} exited with {}: {}",
                self.program.display(),
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            );
        }
        Ok(output)
    }
}

impl Toolchain for GitCli {
    fn version(&self) -> Result<String> {
        let output = self.run(&["--version"])?;
        Ok(extract_version(&output.stdout).unwrap_or_else(|| "unknown".to_string()))
    }

    fn clone_template(&self, url: &str, dest: &Path) -> Result<()> {
        let dest = dest.to_string_lossy();
        self.run(&["clone", "--quiet", url, &dest])?;
        Ok(())
    }

    fn strip_history(&self, dest: &Path) -> Result<()> {
        let metadata = dest.join(".git");
        match fs::remove_dir_all(&metadata) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            result => result.with_context(|| format!("failed to remove {}", metadata.display())),
        }
    }
}

/// First line of a `--version` output
fn extract_version(stdout: &[u8]) -> Option<String> {
    let output = String::from_utf8_lossy(stdout);
    let first_line = output.lines().next()?.trim();
    if first_line.is_empty() {
        return None;
    }
    Some(first_line.to_string())
}
