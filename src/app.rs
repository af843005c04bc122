use anyhow::{bail, Result};
use crossterm::event::{self, Event};
use ratatui::{layout::Position, DefaultTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{self, Instant};

use crate::config::Config;
use crate::input;
use crate::setup::provision::{provision, Toolchain};
use crate::setup::templates::Template;
use crate::setup::wizard::{Command, Wizard};
use crate::types::{AppEvent, Outcome};
use crate::ui;
use crate::ui::spinner::Spinner;

/// Toolchain shared with the provisioning thread
pub type SharedToolchain = Arc<dyn Toolchain + Send + Sync>;

pub struct App {
    config: Config,
    wizard: Wizard,
    spinner: Spinner,
    /// Directory the project is created in
    workdir: PathBuf,
    toolchain: SharedToolchain,
    event_tx: UnboundedSender<AppEvent>,
    event_rx: UnboundedReceiver<AppEvent>,
    /// Set once provisioning fails; the loop exits when it passes
    exit_at: Option<Instant>,
    outcome: Option<Outcome>,
}

impl App {
    pub fn new(
        config: Config,
        workdir: PathBuf,
        placeholder: String,
        toolchain: SharedToolchain,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            config,
            wizard: Wizard::new(placeholder),
            spinner: Spinner::new(),
            workdir,
            toolchain,
            event_tx,
            event_rx,
            exit_at: None,
            outcome: None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<Outcome> {
        spawn_input_reader(self.event_tx.clone());

        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                ui::wizard_ui::render(frame, area, &self.wizard, &self.spinner)
            })?;

            if let Some(outcome) = self.outcome() {
                self.park_cursor(&mut terminal)?;
                tracing::info!(?outcome, "wizard finished");
                return Ok(outcome);
            }

            let event = self.next_event().await?;
            self.handle_event(event)?;
        }
    }

    /// Leave the cursor under the last drawn line so the shell prompt
    /// does not overwrite the wizard output
    fn park_cursor(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        let area = terminal.get_frame().area();
        let used = ui::wizard_ui::wizard_lines(&self.wizard, &self.spinner).len() as u16;
        let y = ui::wizard_ui::cursor_row(area, used);
        terminal.set_cursor_position(Position::new(0, y))?;
        Ok(())
    }

    async fn next_event(&mut self) -> Result<AppEvent> {
        let wait = match self.exit_at {
            Some(deadline) => deadline
                .saturating_duration_since(Instant::now())
                .min(Spinner::INTERVAL),
            None => Spinner::INTERVAL,
        };

        match time::timeout(wait, self.event_rx.recv()).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => bail!("event channel closed"),
            Err(_) => Ok(AppEvent::Tick),
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Input(input) => match self.wizard.handle_input(input)? {
                Command::None => {}
                Command::StartProvisioning {
                    template,
                    project_name,
                } => self.start_provisioning(template, project_name),
                Command::Abort => {
                    tracing::info!("wizard aborted by user");
                    self.outcome = Some(Outcome::Aborted);
                }
            },
            AppEvent::Provisioned(result) => {
                self.wizard.finish_provisioning(result)?;
                match result {
                    Ok(()) => self.outcome = Some(Outcome::Completed),
                    Err(error) => {
                        tracing::warn!(%error, "provisioning failed");
                        self.exit_at = Some(Instant::now() + self.config.ui.exit_delay());
                    }
                }
            }
            AppEvent::Tick => {
                if self.exit_at.is_some_and(|deadline| Instant::now() >= deadline) {
                    self.outcome = Some(Outcome::Failed);
                }
                self.spinner.advance();
            }
        }
        Ok(())
    }

    fn start_provisioning(&self, template: Template, project_name: String) {
        let toolchain = Arc::clone(&self.toolchain);
        let host = self.config.git.host.clone();
        let dest = self.workdir.join(&project_name);
        let tx = self.event_tx.clone();

        tracing::info!(template = template.label, project = %project_name, "starting provisioning");
        std::thread::spawn(move || {
            let result = provision(toolchain.as_ref(), &template, &dest, &host);
            let _ = tx.send(AppEvent::Provisioned(result));
        });
    }
}

/// Forward key presses to the event loop until the receiver goes away
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    let Ok(Event::Key(key)) = event::read() else {
                        continue;
                    };
                    if let Some(input) = input::map_key(key) {
                        if tx.send(AppEvent::Input(input)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "stopped reading terminal input");
                    break;
                }
            }
        }
    });
}
