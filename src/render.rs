//! Render projection: immutable snapshots and the view derived from them.
//!
//! Nothing here touches the model. `lines` builds the styled view the TUI
//! draws; `project` flattens the same lines into plain text.

use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::store::CommandRecord;
use crate::tea::{InputKind, Mode, Notification, NotificationLevel};

const TITLE: &str = "memorycat";
const CARET: &str = "█";

// Color tokens (selection uses REVERSED modifier to adapt to terminal theme)
const COLOR_TITLE: Color = Color::Magenta;
const COLOR_COMMAND: Color = Color::Cyan;
const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_WARNING: Color = Color::Yellow;

/// Lines each list entry occupies: command, description, spacer.
pub const ROWS_PER_RECORD: usize = 3;
/// Lines above the first list entry: title and spacer.
pub const HEADER_ROWS: usize = 2;

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// The template prompt currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub variable: String,
    /// 1-based position of `variable` among all variables.
    pub position: usize,
    pub total: usize,
    pub preview: String,
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub commands: Vec<CommandRecord>,
    pub selected: usize,
    pub mode: Mode,
    pub input_buffer: String,
    pub pending_command: Option<String>,
    pub prompt: Option<PromptView>,
    pub last_error: Option<String>,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            commands: Vec::new(),
            selected: 0,
            mode: Mode::List,
            input_buffer: String::new(),
            pending_command: None,
            prompt: None,
            last_error: None,
            notification: None,
            show_keymap: false,
        }
    }
}

/// Styled view of a snapshot, one case per mode plus the feedback footer.
pub fn lines(state: &RenderState) -> Vec<Line<'static>> {
    let mut out = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(COLOR_TITLE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    match state.mode {
        Mode::List => list_lines(state, &mut out),
        Mode::Generating => {
            out.push(Line::from(Span::styled(
                "Generating description...",
                Style::default().fg(COLOR_TEXT_DIMMED),
            )));
            if let Some(command) = &state.pending_command {
                out.push(Line::default());
                out.push(command_line("Command: ", command));
            }
        }
        Mode::Input(InputKind::Command) => {
            out.push(Line::from("Enter command:"));
            out.push(Line::default());
            out.push(input_line(&state.input_buffer));
        }
        Mode::Input(InputKind::TemplateValue) => template_lines(state, &mut out),
        Mode::Input(InputKind::Description) => {
            out.push(Line::from(Span::styled(
                "Description generation failed.",
                Style::default()
                    .fg(COLOR_WARNING)
                    .add_modifier(Modifier::BOLD),
            )));
            out.push(Line::default());
            out.push(command_line(
                "Command: ",
                state.pending_command.as_deref().unwrap_or(""),
            ));
            out.push(Line::default());
            out.push(Line::from("Please enter a description manually:"));
            out.push(Line::default());
            out.push(input_line(&state.input_buffer));
        }
    }

    footer_lines(state, &mut out);
    out
}

/// Plain-text projection of a snapshot.
pub fn project(state: &RenderState) -> String {
    lines(state)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_lines(state: &RenderState, out: &mut Vec<Line<'static>>) {
    if state.commands.is_empty() {
        out.push(Line::from(Span::styled(
            "No commands saved yet. Press 'n' to add a new command.",
            Style::default().fg(COLOR_TEXT_DIMMED),
        )));
        return;
    }

    for (idx, record) in state.commands.iter().enumerate() {
        let is_selected = idx == state.selected;
        let (cursor, command_style) = if is_selected {
            (
                "> ",
                Style::default()
                    .fg(COLOR_COMMAND)
                    .add_modifier(Modifier::REVERSED),
            )
        } else {
            ("  ", Style::default().fg(COLOR_COMMAND))
        };
        out.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(record.command.clone(), command_style),
        ]));
        out.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                record.description.clone(),
                Style::default().fg(COLOR_TEXT_MUTED),
            ),
        ]));
        out.push(Line::default());
    }
}

fn template_lines(state: &RenderState, out: &mut Vec<Line<'static>>) {
    let Some(prompt) = &state.prompt else {
        out.push(input_line(&state.input_buffer));
        return;
    };

    out.push(Line::from(vec![
        Span::styled(
            format!("Enter value for: {}", prompt.variable),
            Style::default()
                .fg(COLOR_COMMAND)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({}/{})", prompt.position, prompt.total)),
    ]));
    out.push(Line::default());
    out.push(input_line(&state.input_buffer));
    out.push(Line::default());
    out.push(Line::from(Span::styled(
        format!("Preview: {}", prompt.preview),
        Style::default().fg(COLOR_TEXT_MUTED),
    )));
}

fn footer_lines(state: &RenderState, out: &mut Vec<Line<'static>>) {
    if let Some(notification) = &state.notification {
        out.push(Line::default());
        out.push(notification_line(notification));
    }

    if let Some(err) = &state.last_error {
        out.push(Line::default());
        out.push(Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(err.clone(), Style::default().fg(Color::Red)),
        ]));
    }
}

/// Error: red with "Error:" prefix. Info: green without prefix.
fn notification_line(notification: &Notification) -> Line<'static> {
    match notification.level {
        NotificationLevel::Error => Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(Color::Red),
            ),
        ]),
        NotificationLevel::Info => Line::from(Span::styled(
            notification.message.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    }
}

fn input_line(buffer: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(buffer.to_string(), Style::default().fg(Color::White)),
        Span::styled(
            CARET,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ])
}

fn command_line(label: &'static str, command: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(label),
        Span::styled(command.to_string(), Style::default().fg(COLOR_COMMAND)),
    ])
}
