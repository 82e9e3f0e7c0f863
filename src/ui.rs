//! Terminal UI drawing for the memorycat session.
//!
//! Draws from RenderState (immutable snapshot) - it never mutates application
//! state. The body is the render projection; the bottom line is a
//! context-sensitive keymap.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::render::{self, RenderState, HEADER_ROWS, ROWS_PER_RECORD};
use crate::tea::{InputKind, Mode};

const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// Normal list browsing
    List { has_selection: bool },
    /// Text input (command, template value, manual description)
    TextInput(InputKind),
    /// Waiting on the generator
    Generating,
}

impl KeymapContext {
    pub fn from_render_state(state: &RenderState) -> Self {
        match state.mode {
            Mode::List => KeymapContext::List {
                has_selection: !state.commands.is_empty(),
            },
            Mode::Input(kind) => KeymapContext::TextInput(kind),
            Mode::Generating => KeymapContext::Generating,
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    match ctx {
        KeymapContext::List { has_selection } => {
            let record_actions = if has_selection {
                vec![
                    Keybinding("enter/c", "copy"),
                    Keybinding("d", "delete"),
                    Keybinding("↑/k ↓/j", "navigate"),
                ]
            } else {
                vec![]
            };
            vec![
                KeybindingGroup(vec![Keybinding("n", "new")]),
                KeybindingGroup(record_actions),
                KeybindingGroup(vec![Keybinding("q", "quit")]),
            ]
        }
        KeymapContext::TextInput(kind) => {
            let submit = match kind {
                InputKind::TemplateValue => "next",
                InputKind::Command | InputKind::Description => "save",
            };
            vec![KeybindingGroup(vec![
                Keybinding("enter", submit),
                Keybinding("esc", "cancel"),
            ])]
        }
        KeymapContext::Generating => vec![],
    }
}

/// Main render function - entry point for all UI drawing.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < 2 {
        render_body(frame, state, area);
        return;
    }

    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
    render_body(frame, state, chunks[0]);
    render_statusbar(frame, state, chunks[1]);
}

/// Render the projection, scrolled so the selected entry stays centered.
fn render_body(frame: &mut Frame, state: &RenderState, area: Rect) {
    let lines = render::lines(state);
    let offset = match state.mode {
        Mode::List => scroll_offset(state.selected, lines.len(), area.height as usize),
        _ => 0,
    };
    let paragraph = Paragraph::new(lines).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

/// Scrolloff: keep the selected entry near the middle of the body.
fn scroll_offset(selected: usize, total_lines: usize, height: usize) -> u16 {
    if total_lines <= height {
        return 0;
    }
    let selected_line = HEADER_ROWS + selected * ROWS_PER_RECORD;
    let start = selected_line.saturating_sub(height / 2);
    let max_start = total_lines - height;
    start.min(max_start).min(u16::MAX as usize) as u16
}

/// Bottom line: a dimmed "?" when collapsed, "? │ <keymap>" when expanded.
/// Text input always shows its hints since '?' is typed text there.
fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    frame.render_widget(Paragraph::new(keymap_line(state)), area);
}

fn keymap_line(state: &RenderState) -> Line<'static> {
    let ctx = KeymapContext::from_render_state(state);
    let groups = keybindings_for_context(ctx);

    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let expanded = match ctx {
        KeymapContext::List { .. } => state.show_keymap,
        KeymapContext::TextInput(_) => true,
        KeymapContext::Generating => false,
    };

    let mut spans: Vec<Span> = Vec::new();
    if let KeymapContext::List { .. } = ctx {
        let help_style = if state.show_keymap {
            Style::default()
        } else {
            Style::default().fg(COLOR_TEXT_MUTED)
        };
        spans.push(Span::styled("?", help_style));
    }

    if expanded {
        for group in groups.iter() {
            if group.0.is_empty() {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::styled(" │ ", sep_style));
            }
            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}
