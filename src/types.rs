use std::process::ExitCode;

use crate::input::WizardInput;
use crate::setup::provision::ProvisionError;

/// Events consumed by the main loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(WizardInput),
    /// Result of the background provisioning run
    Provisioned(Result<(), ProvisionError>),
    /// Spinner animation and exit deadline check
    Tick,
}

/// How a wizard run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed,
    Aborted,
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
            Outcome::Aborted => ExitCode::from(130),
        }
    }
}
