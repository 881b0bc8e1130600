use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::core::controller::{ResultEntry, ResultScroll, SceneController};
use crate::ui::theme::Theme;
use crate::ui::view::{project, ButtonView, SceneView};

const MIN_INPUT_LINES: u16 = 3;
const MAX_INPUT_LINES: u16 = 8;
const ERROR_PREFIX: &str = "⚠ ";

/// Screen regions from the last draw, used for mouse hit-testing and scroll
/// clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub input: Rect,
    pub button: Rect,
    pub results: Option<Rect>,
    pub result_max_scroll: u16,
}

/// Loader symbol for a generation that has been running for `elapsed`.
pub fn pulse_symbol(elapsed: Duration) -> &'static str {
    let elapsed = elapsed.as_millis() as f32 / 1000.0;
    let pulse_phase = (elapsed * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        "○"
    } else if pulse_intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

pub fn ui(
    f: &mut Frame,
    controller: &SceneController,
    theme: &Theme,
    loading_for: Duration,
) -> FrameLayout {
    let view = project(controller);
    let area = f.area();

    let input_lines = (controller.textarea().lines().len() as u16)
        .clamp(MIN_INPUT_LINES, MAX_INPUT_LINES);

    let mut constraints = vec![
        Constraint::Length(3),               // header
        Constraint::Length(input_lines + 2), // input + borders
        Constraint::Length(3),               // button
    ];
    if view.results.is_some() {
        constraints.push(Constraint::Min(3));
    } else {
        constraints.push(Constraint::Min(0));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(f, &view, theme, chunks[0]);
    render_input(f, controller, &view, theme, chunks[1]);
    let button = render_button(f, &view.button, theme, chunks[2], loading_for);

    let mut layout = FrameLayout {
        input: chunks[1],
        button,
        results: None,
        result_max_scroll: 0,
    };

    if let Some(entries) = view.results {
        let results_area = chunks[3];
        layout.results = Some(results_area);
        layout.result_max_scroll =
            render_results(f, entries, controller.scroll(), theme, results_area);
    }

    if let Some(message) = view.notice {
        render_notice(f, message, theme, area);
    }

    layout
}

fn render_header(f: &mut Frame, view: &SceneView<'_>, theme: &Theme, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(view.header.title, theme.title_style)),
        Line::from(Span::styled(view.header.subtitle, theme.subtitle_style)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(header, area);
}

fn render_input(
    f: &mut Frame,
    controller: &SceneController,
    view: &SceneView<'_>,
    theme: &Theme,
    area: Rect,
) {
    let border_style = if view.input.focused {
        theme.input_border_focused_style
    } else {
        theme.input_border_style
    };
    let hint = if controller.accepts_triggers() {
        " Ctrl+Enter to generate · Tab to focus button "
    } else {
        " Ctrl+C to quit "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(view.input.label, theme.input_title_style))
        .title_bottom(Line::from(Span::styled(hint, theme.input_title_style)).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut textarea = controller.textarea().clone();
    textarea.set_style(theme.input_text_style);
    textarea.set_placeholder_style(theme.input_placeholder_style);
    textarea.set_cursor_line_style(Style::default());
    if !view.input.focused {
        textarea.set_cursor_style(Style::default());
    }
    f.render_widget(&textarea, inner);
}

fn render_button(
    f: &mut Frame,
    button: &ButtonView,
    theme: &Theme,
    area: Rect,
    loading_for: Duration,
) -> Rect {
    let mut spans = Vec::new();
    if button.show_loader {
        spans.push(Span::styled(pulse_symbol(loading_for), theme.loader_style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(button.label));
    let line = Line::from(spans);

    let width = (line.width() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width,
        height: area.height.min(3),
    };

    let style = if !button.enabled {
        theme.button_disabled_style
    } else if button.focused {
        theme.button_focused_style
    } else {
        theme.button_style
    };

    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(widget, rect);
    rect
}

/// Returns the largest valid scroll offset for the rendered content.
fn render_results(
    f: &mut Frame,
    entries: &[ResultEntry],
    scroll: ResultScroll,
    theme: &Theme,
    area: Rect,
) -> u16 {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.results_border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = build_result_lines(entries, theme, inner.width as usize);
    let max_offset = max_scroll_offset(lines.len(), inner.height);

    let offset = if scroll.follow_latest {
        max_offset
    } else {
        scroll.offset.min(max_offset)
    };

    let paragraph = Paragraph::new(lines).scroll((offset, 0));
    f.render_widget(paragraph, inner);
    max_offset
}

/// Largest scroll offset that still fills a viewport of `height` rows.
fn max_scroll_offset(line_count: usize, height: u16) -> u16 {
    u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_sub(height)
}

fn render_notice(f: &mut Frame, message: &str, theme: &Theme, area: Rect) {
    let width = area.width.saturating_sub(4).clamp(1, 60);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(5) / 2,
        width,
        height: area.height.min(5),
    };

    f.render_widget(Clear, rect);
    let notice = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), theme.notice_text_style)),
        Line::from(""),
        Line::from(Span::styled("Press Enter to continue", theme.subtitle_style)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.notice_border_style)
            .title("Notice"),
    );
    f.render_widget(notice, rect);
}

/// Flatten the result entries into terminal lines, hard-wrapped to `width`.
///
/// Scenes are preformatted: leading indentation and blank lines survive, and
/// long lines are broken at the column limit instead of at word boundaries.
pub fn build_result_lines(
    entries: &[ResultEntry],
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for entry in entries {
        match entry {
            ResultEntry::Scene(text) => {
                for raw in text.lines() {
                    for chunk in wrap_preformatted(raw, width) {
                        lines.push(Line::from(Span::styled(chunk, theme.scene_text_style)));
                    }
                }
                lines.push(Line::from(""));
            }
            ResultEntry::Error(message) => {
                let text = format!("{ERROR_PREFIX}{message}");
                for chunk in wrap_preformatted(&text, width) {
                    lines.push(Line::from(Span::styled(chunk, theme.error_text_style)));
                }
                lines.push(Line::from(""));
            }
            ResultEntry::Separator => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width),
                    theme.separator_style,
                )));
                lines.push(Line::from(""));
            }
        }
    }

    lines
}

/// Break `line` into pieces no wider than `width` display columns.
pub fn wrap_preformatted(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    chunks.push(current);
    chunks
}
