//! Materializes the selected template into a local project directory

use std::path::Path;
use thiserror::Error;

use crate::setup::templates::Template;

/// First failure of a provisioning run. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error("Git is not installed!")]
    ToolUnavailable,
    #[error("Failed to fetch the template!")]
    FetchFailed,
    #[error("Failed to initialize the project!")]
    InitFailed,
}

/// External operations needed to provision a project
pub trait Toolchain {
    /// Probe the version-control tool, returning its version line
    fn version(&self) -> anyhow::Result<String>;

    /// Clone `url` into the new directory `dest`
    fn clone_template(&self, url: &str, dest: &Path) -> anyhow::Result<()>;

    /// Detach `dest` from the template's history
    fn strip_history(&self, dest: &Path) -> anyhow::Result<()>;
}

/// Run the three provisioning steps in order, stopping at the first failure
///
/// Nothing is rolled back: a failed `strip_history` leaves the clone in place.
pub fn provision(
    toolchain: &dyn Toolchain,
    template: &Template,
    dest: &Path,
    host: &str,
) -> Result<(), ProvisionError> {
    let version = toolchain.version().map_err(|e| {
        tracing::warn!(error = %format!("{e:#}"), "version control tool probe failed");
        ProvisionError::ToolUnavailable
    })?;
    tracing::info!(version = %version, "found version control tool");

    let url = template.remote_url(host);
    tracing::info!(url = %url, dest = %dest.display(), "cloning template");
    toolchain.clone_template(&url, dest).map_err(|e| {
        tracing::warn!(error = %format!("{e:#}"), url = %url, "clone failed");
        if dest.exists() {
            tracing::warn!(dest = %dest.display(), "leaving partially cloned directory in place");
        }
        ProvisionError::FetchFailed
    })?;

    toolchain.strip_history(dest).map_err(|e| {
        tracing::warn!(
            error = %format!("{e:#}"),
            dest = %dest.display(),
            "could not remove template history, leaving clone in place"
        );
        ProvisionError::InitFailed
    })?;

    tracing::info!(dest = %dest.display(), "project provisioned");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::path::PathBuf;

    use crate::setup::templates::get_builtin_templates;

    /// Records calls and fails at a chosen step
    #[derive(Default)]
    struct FakeToolchain {
        fail_version: bool,
        fail_clone: bool,
        fail_strip: bool,
        calls: RefCell<Vec<String>>,
    }

    impl Toolchain for FakeToolchain {
        fn version(&self) -> anyhow::Result<String> {
            self.calls.borrow_mut().push("version".to_string());
            if self.fail_version {
                bail!("git: command not found");
            }
            Ok("git version 2.43.0".to_string())
        }

        fn clone_template(&self, url: &str, dest: &Path) -> anyhow::Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("clone {} {}", url, dest.display()));
            if self.fail_clone {
                bail!("repository not found");
            }
            Ok(())
        }

        fn strip_history(&self, dest: &Path) -> anyhow::Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("strip {}", dest.display()));
            if self.fail_strip {
                bail!("permission denied");
            }
            Ok(())
        }
    }

    fn run(toolchain: &FakeToolchain) -> Result<(), ProvisionError> {
        provision(
            toolchain,
            &get_builtin_templates()[0],
            &PathBuf::from("my-app"),
            "https://github.com",
        )
    }

    #[test]
    fn test_all_steps_succeed_in_order() {
        let toolchain = FakeToolchain::default();
        assert_eq!(run(&toolchain), Ok(()));
        assert_eq!(
            *toolchain.calls.borrow(),
            vec![
                "version".to_string(),
                "clone https://github.com/kimkanu/react-vite-electron my-app".to_string(),
                "strip my-app".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_tool_stops_before_clone() {
        let toolchain = FakeToolchain {
            fail_version: true,
            ..Default::default()
        };
        assert_eq!(run(&toolchain), Err(ProvisionError::ToolUnavailable));
        assert_eq!(toolchain.calls.borrow().len(), 1);
    }

    #[test]
    fn test_failed_clone_skips_strip() {
        let toolchain = FakeToolchain {
            fail_clone: true,
            ..Default::default()
        };
        assert_eq!(run(&toolchain), Err(ProvisionError::FetchFailed));
        assert!(!toolchain
            .calls
            .borrow()
            .iter()
            .any(|c| c.starts_with("strip")));
    }

    #[test]
    fn test_failed_strip_is_init_failure() {
        let toolchain = FakeToolchain {
            fail_strip: true,
            ..Default::default()
        };
        assert_eq!(run(&toolchain), Err(ProvisionError::InitFailed));
        assert_eq!(toolchain.calls.borrow().len(), 3);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ProvisionError::ToolUnavailable.to_string(), "Git is not installed!");
        assert_eq!(
            ProvisionError::FetchFailed.to_string(),
            "Failed to fetch the template!"
        );
        assert_eq!(
            ProvisionError::InitFailed.to_string(),
            "Failed to initialize the project!"
        );
    }
}
