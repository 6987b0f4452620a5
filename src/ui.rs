use clap::ValueEnum;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};

use crate::buffer::LINE_END_GLYPH;
use crate::metrics::Summary;
use crate::picker::Picker;
use crate::session::{Mark, Session};

/// Shown on the ready screen when the theme degraded to monochrome.
pub const NO_COLOR_WARNING: &str =
    "This terminal does not support colors and could behave unexpectedly.";

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    ValueEnum,
    strum_macros::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether color output should be used. `Auto` honors the NO_COLOR
    /// convention and dumb terminals.
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                std::env::var_os("NO_COLOR").is_none()
                    && std::env::var("TERM").map_or(true, |term| term != "dumb")
            }
        }
    }
}

/// Concrete styles for the six abstract cell states.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    normal: Style,
    cursor: Style,
    correct: Style,
    correct_eol: Style,
    wrong: Style,
    wrong_eol: Style,
}

impl Theme {
    pub fn color() -> Self {
        let italic = Style::default().add_modifier(Modifier::ITALIC);
        Self {
            normal: Style::default().fg(Color::White),
            cursor: Style::default().fg(Color::Black).bg(Color::White),
            correct: italic.fg(Color::Green),
            correct_eol: Style::default().fg(Color::Green).bg(Color::Green),
            wrong: italic.fg(Color::Red),
            wrong_eol: Style::default().fg(Color::Red).bg(Color::Red),
        }
    }

    /// Reduced vocabulary for terminals without color: modifiers only.
    pub fn monochrome() -> Self {
        let italic = Style::default().add_modifier(Modifier::ITALIC);
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        Self {
            normal: Style::default(),
            cursor: reversed,
            correct: italic,
            correct_eol: italic.add_modifier(Modifier::REVERSED),
            wrong: Style::default().add_modifier(Modifier::CROSSED_OUT),
            wrong_eol: Style::default()
                .add_modifier(Modifier::CROSSED_OUT | Modifier::REVERSED),
        }
    }

    /// Theme for the requested mode, plus the warning the ready screen
    /// surfaces when color was requested implicitly but unavailable.
    pub fn select(mode: ColorMode) -> (Self, Option<&'static str>) {
        if mode.enabled() {
            (Self::color(), None)
        } else {
            let warning = (mode == ColorMode::Auto).then_some(NO_COLOR_WARNING);
            (Self::monochrome(), warning)
        }
    }

    pub fn style(&self, mark: Mark) -> Style {
        match mark {
            Mark::Normal => self.normal,
            Mark::Cursor => self.cursor,
            Mark::Correct { at_eol: false } => self.correct,
            Mark::Correct { at_eol: true } => self.correct_eol,
            Mark::Wrong { at_eol: false } => self.wrong,
            Mark::Wrong { at_eol: true } => self.wrong_eol,
        }
    }
}

/// Paint the current page: one row per visible line, one span per cell,
/// with the synthetic end-of-line glyph as the final cell of each row.
pub fn render_page(f: &mut Frame, session: &Session, theme: &Theme) {
    let (start, end) = session.page();
    let buffer = session.buffer();

    let mut rows = Vec::with_capacity(end - start);
    for line_num in start..end {
        let text = buffer.line(line_num);
        let mut spans = Vec::with_capacity(buffer.line_len(line_num) + 1);
        for (line_index, c) in text.chars().enumerate() {
            let mark = session.mark_at(line_num, line_index);
            // a scored space would be invisible; show the middle dot
            let glyph = if c == ' ' && matches!(mark, Mark::Correct { .. } | Mark::Wrong { .. })
            {
                '·'
            } else {
                c
            };
            spans.push(Span::styled(glyph.to_string(), theme.style(mark)));
        }
        let eol_mark = session.mark_at(line_num, buffer.line_len(line_num));
        spans.push(Span::styled(
            LINE_END_GLYPH.to_string(),
            theme.style(eol_mark),
        ));
        rows.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(rows), f.area());
}

/// Start screen shown before the first keystroke.
pub fn render_ready(f: &mut Frame, file_name: &str, warning: Option<&str>) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("retype: {file_name}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Press a button when you are ready to start!"),
    ];
    if let Some(warning) = warning {
        lines.push(Line::from(Span::styled(
            warning,
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    f.render_widget(Paragraph::new(lines), f.area());
}

/// Final screen: metrics, or a neutral message when nothing was scored.
pub fn render_summary(f: &mut Frame, summary: Option<&Summary>) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = match summary {
        Some(summary) => vec![
            Line::from(Span::styled(
                format!("Accuracy: {:.2}%", summary.accuracy * 100.0),
                bold,
            )),
            Line::from(Span::styled(format!("Speed: {:.2} wpm.", summary.wpm), bold)),
        ],
        None => vec![Line::from(Span::styled("You didn't even try...", bold))],
    };
    f.render_widget(Paragraph::new(lines), f.area());
}

/// Directory listing for the interactive picker.
pub fn render_picker(f: &mut Frame, picker: &Picker) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        picker.dir().display().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = picker
        .entries()
        .iter()
        .map(|entry| {
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            ListItem::new(name)
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(picker.selected()));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let help = Paragraph::new(Span::styled(
        "up/down move  enter select  backspace parent  esc quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}
