//! Wizard UI rendering
//!
//! Stages are stacked top to bottom, each showing either its pending view or
//! a single confirmed line once its step is complete.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::setup::wizard::{Wizard, WizardStep};
use crate::ui::spinner::Spinner;

/// Rows needed to show every stage at once, plus one for the cursor to rest
/// on after exit
pub const VIEWPORT_HEIGHT: u16 = 6;

/// Render the installation wizard
pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, spinner: &Spinner) {
    frame.render_widget(Paragraph::new(wizard_lines(wizard, spinner)), area);
}

/// Row for the exit cursor: the first one below `used` drawn lines,
/// clamped to the viewport
pub fn cursor_row(area: Rect, used: u16) -> u16 {
    area.y + used.min(area.height.saturating_sub(1))
}

/// Lines for every visible stage, in order
pub fn wizard_lines(wizard: &Wizard, spinner: &Spinner) -> Vec<Line<'static>> {
    let state = wizard.state();
    let mut lines = Vec::new();

    lines.extend(name_lines(wizard));
    if state.shows_template_stage() {
        lines.extend(template_lines(wizard));
    }
    if state.shows_provisioning_stage() {
        lines.push(provisioning_line(state.step(), spinner));
    }
    if state.shows_done_stage() {
        lines.extend(done_lines(state.project_name().unwrap_or_default()));
    }
    if state.shows_error_stage() {
        let message = state.error().map(|e| e.to_string()).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("✖", Style::default().fg(Color::Red)),
            Span::raw(format!(" {}", message)),
        ]));
    }

    lines
}

fn confirmed_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("✔", Style::default().fg(Color::Green)),
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::White)),
        Span::styled(
            value.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn question_spans(label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled("?", Style::default().fg(Color::LightBlue)),
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::White)),
    ]
}

fn name_lines(wizard: &Wizard) -> Vec<Line<'static>> {
    let title = WizardStep::Naming.title();
    if let Some(name) = wizard.state().project_name() {
        return vec![confirmed_line(title, name)];
    }

    let mut spans = question_spans(title);
    let value = wizard.name_input().value();
    let cursor = Style::default().add_modifier(Modifier::REVERSED);
    if value.is_empty() {
        // Cursor sits on the first placeholder character
        let mut chars = wizard.placeholder().chars();
        let first = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        spans.push(Span::styled(first, cursor.fg(Color::DarkGray)));
        spans.push(Span::styled(
            chars.as_str().to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(value.to_string()));
        spans.push(Span::styled(" ", cursor));
    }
    vec![Line::from(spans)]
}

fn template_lines(wizard: &Wizard) -> Vec<Line<'static>> {
    let title = WizardStep::SelectingTemplate.title();
    if let Some(template) = wizard.state().template() {
        return vec![confirmed_line(title, template.label)];
    }

    let picker = wizard.picker();
    let mut lines = vec![Line::from(question_spans(title))];
    for (i, template) in picker.templates().iter().enumerate() {
        let selected = i == picker.cursor();
        let label_style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(
                if selected { "❯   " } else { "    " },
                Style::default().fg(Color::LightBlue),
            ),
            Span::styled(template.label, label_style),
        ]));
    }
    lines
}

fn provisioning_line(step: WizardStep, spinner: &Spinner) -> Line<'static> {
    if step >= WizardStep::Done {
        Line::from(vec![
            Span::styled("✔", Style::default().fg(Color::Green)),
            Span::raw(" Downloaded the template"),
        ])
    } else {
        Line::from(vec![
            Span::styled(spinner.frame(), Style::default().fg(Color::Green)),
            Span::raw(" Downloading the template..."),
        ])
    }
}

fn done_lines(project_name: &str) -> Vec<Line<'static>> {
    let command = |text: String| Span::styled(text, Style::default().fg(Color::Gray));
    vec![
        Line::from(vec![
            Span::styled("✔", Style::default().fg(Color::Green)),
            Span::raw(" Done!"),
        ]),
        Line::from(vec![
            Span::raw("Run "),
            command(format!("`cd {}`", project_name)),
            Span::raw(", "),
            command("`npm i`".to_string()),
            Span::raw(", and "),
            command("`npm run dev`".to_string()),
            Span::raw("!"),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WizardInput;
    use crate::setup::provision::ProvisionError;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn text(wizard: &Wizard) -> Vec<String> {
        wizard_lines(wizard, &Spinner::new())
            .iter()
            .map(|line| line.to_string())
            .collect()
    }

    fn submit_name(wizard: &mut Wizard, name: &str) {
        for c in name.chars() {
            wizard.handle_input(WizardInput::Char(c)).unwrap();
        }
        wizard.handle_input(WizardInput::Submit).unwrap();
    }

    #[test]
    fn test_initial_view_shows_placeholder() {
        let wizard = Wizard::new("amber-river".to_string());
        assert_eq!(text(&wizard), vec!["? Project name: amber-river"]);
    }

    #[test]
    fn test_typed_name_replaces_placeholder() {
        let mut wizard = Wizard::new("amber-river".to_string());
        wizard.handle_input(WizardInput::Char('m')).unwrap();
        wizard.handle_input(WizardInput::Char('y')).unwrap();
        assert_eq!(text(&wizard), vec!["? Project name: my "]);
    }

    #[test]
    fn test_template_list_marks_cursor() {
        let mut wizard = Wizard::new("amber-river".to_string());
        submit_name(&mut wizard, "my-app");
        wizard.handle_input(WizardInput::Down).unwrap();
        assert_eq!(
            text(&wizard),
            vec![
                "✔ Project name: my-app",
                "? Select a template: ",
                "    React + Vite + Electron",
                "❯   Ultrajs Starter",
            ]
        );
    }

    #[test]
    fn test_provisioning_view() {
        let mut wizard = Wizard::new("amber-river".to_string());
        submit_name(&mut wizard, "my-app");
        wizard.handle_input(WizardInput::Submit).unwrap();
        assert_eq!(
            text(&wizard),
            vec![
                "✔ Project name: my-app",
                "✔ Select a template: React + Vite + Electron",
                "⠋ Downloading the template...",
            ]
        );
    }

    #[test]
    fn test_done_view_lists_follow_up_commands() {
        let mut wizard = Wizard::new("amber-river".to_string());
        submit_name(&mut wizard, "my-app");
        wizard.handle_input(WizardInput::Submit).unwrap();
        wizard.finish_provisioning(Ok(())).unwrap();
        assert_eq!(
            text(&wizard),
            vec![
                "✔ Project name: my-app",
                "✔ Select a template: React + Vite + Electron",
                "✔ Downloaded the template",
                "✔ Done!",
                "Run `cd my-app`, `npm i`, and `npm run dev`!",
            ]
        );
    }

    #[test]
    fn test_error_line_is_appended() {
        let mut wizard = Wizard::new("amber-river".to_string());
        submit_name(&mut wizard, "");
        wizard.handle_input(WizardInput::Submit).unwrap();
        wizard
            .finish_provisioning(Err(ProvisionError::ToolUnavailable))
            .unwrap();
        assert_eq!(
            text(&wizard),
            vec![
                "✔ Project name: amber-river",
                "✔ Select a template: React + Vite + Electron",
                "⠋ Downloading the template...",
                "✖ Git is not installed!",
            ]
        );
    }

    #[test]
    fn test_all_stages_fit_viewport() {
        let mut wizard = Wizard::new("amber-river".to_string());
        submit_name(&mut wizard, "my-app");
        wizard.handle_input(WizardInput::Submit).unwrap();
        wizard.finish_provisioning(Ok(())).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, VIEWPORT_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &wizard, &Spinner::new())
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert!(row(0).starts_with("✔ Project name: my-app"));
        assert!(row(4).starts_with("Run `cd my-app`"));
        assert!(row(5).trim().is_empty());
        assert!(wizard_lines(&wizard, &Spinner::new()).len() < VIEWPORT_HEIGHT as usize);
    }

    #[test]
    fn test_cursor_rests_below_done_view() {
        let mut wizard = Wizard::new("amber-river".to_string());
        submit_name(&mut wizard, "my-app");
        wizard.handle_input(WizardInput::Submit).unwrap();
        wizard.finish_provisioning(Ok(())).unwrap();

        let used = wizard_lines(&wizard, &Spinner::new()).len() as u16;
        let area = Rect::new(0, 0, 60, VIEWPORT_HEIGHT);
        assert_eq!(cursor_row(area, used), used);

        let shifted = Rect::new(0, 12, 60, VIEWPORT_HEIGHT);
        assert_eq!(cursor_row(shifted, used), 12 + used);
    }

    #[test]
    fn test_cursor_row_clamps_to_viewport() {
        let area = Rect::new(0, 3, 60, 4);
        assert_eq!(cursor_row(area, 9), 6);
        assert_eq!(cursor_row(area, 0), 3);
    }
}
