//! Wizard state machine and input stages

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::input::WizardInput;
use crate::setup::provision::ProvisionError;
use crate::setup::templates::{get_builtin_templates, Template};

static PROJECT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Wizard step enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Naming,
    SelectingTemplate,
    Provisioning,
    Done,
}

impl WizardStep {
    pub fn next(&self) -> Self {
        match self {
            WizardStep::Naming => WizardStep::SelectingTemplate,
            WizardStep::SelectingTemplate => WizardStep::Provisioning,
            WizardStep::Provisioning => WizardStep::Done,
            WizardStep::Done => WizardStep::Done,
        }
    }

    /// Ordinal position, starting at 0
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Naming => 0,
            WizardStep::SelectingTemplate => 1,
            WizardStep::Provisioning => 2,
            WizardStep::Done => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Naming => "Project name",
            WizardStep::SelectingTemplate => "Select a template",
            WizardStep::Provisioning => "Downloading the template",
            WizardStep::Done => "Done",
        }
    }
}

/// Which stage currently owns the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Naming,
    SelectingTemplate,
    Provisioning,
    Done,
    Failed,
}

/// A request to move the wizard forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    NameConfirmed(String),
    TemplateConfirmed(Template),
    Provisioned,
    Failed(ProvisionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("the wizard has already failed")]
    Terminal,
    #[error("transition not allowed at step {step:?}")]
    OutOfOrder { step: WizardStep },
}

/// Progress and selections of a single wizard run
///
/// Only [`WizardState::apply`] mutates it, so the step only ever moves one
/// position forward and each field is written once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    step: WizardStep,
    project_name: Option<String>,
    template: Option<Template>,
    error: Option<ProvisionError>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn error(&self) -> Option<ProvisionError> {
        self.error
    }

    pub fn phase(&self) -> Phase {
        if self.error.is_some() {
            return Phase::Failed;
        }
        match self.step {
            WizardStep::Naming => Phase::Naming,
            WizardStep::SelectingTemplate => Phase::SelectingTemplate,
            WizardStep::Provisioning => Phase::Provisioning,
            WizardStep::Done => Phase::Done,
        }
    }

    pub fn shows_template_stage(&self) -> bool {
        self.step >= WizardStep::SelectingTemplate
    }

    pub fn shows_provisioning_stage(&self) -> bool {
        self.step >= WizardStep::Provisioning
    }

    pub fn shows_done_stage(&self) -> bool {
        self.step >= WizardStep::Done
    }

    pub fn shows_error_stage(&self) -> bool {
        self.error.is_some()
    }

    /// Apply a transition. A rejected transition leaves the state untouched.
    pub fn apply(&mut self, transition: Transition) -> Result<(), TransitionError> {
        if self.error.is_some() {
            return Err(TransitionError::Terminal);
        }
        let step = self.step;
        match (step, transition) {
            (WizardStep::Naming, Transition::NameConfirmed(name)) => {
                self.project_name = Some(name);
            }
            (WizardStep::SelectingTemplate, Transition::TemplateConfirmed(template)) => {
                self.template = Some(template);
            }
            (WizardStep::Provisioning, Transition::Provisioned) => {}
            (WizardStep::Provisioning, Transition::Failed(error)) => {
                self.error = Some(error);
                tracing::debug!(error = %error, "wizard failed");
                return Ok(());
            }
            _ => return Err(TransitionError::OutOfOrder { step }),
        }
        self.step = step.next();
        tracing::debug!(from = step.index(), to = self.step.index(), "wizard advanced");
        Ok(())
    }
}

/// True if `name` is usable as a project directory name
pub fn is_valid_project_name(name: &str) -> bool {
    PROJECT_NAME.is_match(name)
}

/// Resolve a submitted name, substituting `placeholder` for blank input
pub fn resolve_project_name(submitted: &str, placeholder: &str) -> Option<String> {
    let name = if submitted.trim().is_empty() {
        placeholder
    } else {
        submitted
    };
    is_valid_project_name(name).then(|| name.to_string())
}

/// Text being typed into the name prompt
#[derive(Debug, Clone, Default)]
pub struct NameInput {
    value: String,
}

impl NameInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn submit(&self, placeholder: &str) -> Option<String> {
        resolve_project_name(&self.value, placeholder)
    }
}

/// Cursor over the template catalog
#[derive(Debug, Clone)]
pub struct TemplatePicker {
    templates: &'static [Template],
    cursor: usize,
}

impl Default for TemplatePicker {
    fn default() -> Self {
        Self::new(get_builtin_templates())
    }
}

impl TemplatePicker {
    /// `templates` must not be empty
    pub fn new(templates: &'static [Template]) -> Self {
        Self {
            templates,
            cursor: 0,
        }
    }

    pub fn templates(&self) -> &'static [Template] {
        self.templates
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn up(&mut self) {
        let len = self.templates.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    pub fn down(&mut self) {
        self.cursor = (self.cursor + 1) % self.templates.len();
    }

    pub fn selected(&self) -> &Template {
        &self.templates[self.cursor]
    }
}

/// Work the controller must carry out after an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    StartProvisioning { template: Template, project_name: String },
    Abort,
}

/// Routes input to whichever stage owns the current step
#[derive(Debug, Clone)]
pub struct Wizard {
    state: WizardState,
    placeholder: String,
    name_input: NameInput,
    picker: TemplatePicker,
}

impl Wizard {
    /// `placeholder` is the suggested name, computed once per run
    pub fn new(placeholder: String) -> Self {
        Self {
            state: WizardState::new(),
            placeholder,
            name_input: NameInput::default(),
            picker: TemplatePicker::default(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn name_input(&self) -> &NameInput {
        &self.name_input
    }

    pub fn picker(&self) -> &TemplatePicker {
        &self.picker
    }

    pub fn handle_input(&mut self, input: WizardInput) -> Result<Command, TransitionError> {
        match (self.state.phase(), input) {
            (Phase::Naming | Phase::SelectingTemplate, WizardInput::Abort) => Ok(Command::Abort),
            (Phase::Naming, WizardInput::Char(c)) => {
                self.name_input.push_char(c);
                Ok(Command::None)
            }
            (Phase::Naming, WizardInput::Backspace) => {
                self.name_input.pop_char();
                Ok(Command::None)
            }
            (Phase::Naming, WizardInput::Submit) => {
                match self.name_input.submit(&self.placeholder) {
                    Some(name) => self.state.apply(Transition::NameConfirmed(name))?,
                    None => {
                        tracing::debug!(input = %self.name_input.value(), "rejected project name")
                    }
                }
                Ok(Command::None)
            }
            (Phase::SelectingTemplate, WizardInput::Up) => {
                self.picker.up();
                Ok(Command::None)
            }
            (Phase::SelectingTemplate, WizardInput::Down) => {
                self.picker.down();
                Ok(Command::None)
            }
            (Phase::SelectingTemplate, WizardInput::Submit) => {
                let template = self.picker.selected().clone();
                self.state
                    .apply(Transition::TemplateConfirmed(template.clone()))?;
                let project_name = self.state.project_name().unwrap_or_default().to_string();
                Ok(Command::StartProvisioning {
                    template,
                    project_name,
                })
            }
            _ => Ok(Command::None),
        }
    }

    pub fn finish_provisioning(
        &mut self,
        result: Result<(), ProvisionError>,
    ) -> Result<(), TransitionError> {
        match result {
            Ok(()) => self.state.apply(Transition::Provisioned),
            Err(error) => self.state.apply(Transition::Failed(error)),
        }
    }
}
