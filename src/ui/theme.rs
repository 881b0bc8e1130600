use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Header
    pub title_style: Style,
    pub subtitle_style: Style,

    // Input section
    pub input_border_style: Style,
    pub input_border_focused_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_placeholder_style: Style,

    // Trigger control
    pub button_style: Style,
    pub button_focused_style: Style,
    pub button_disabled_style: Style,
    pub loader_style: Style,

    // Result area
    pub results_border_style: Style,
    pub scene_text_style: Style,
    pub error_text_style: Style,
    pub separator_style: Style,

    pub notice_border_style: Style,
    pub notice_text_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::Gray),

            input_border_style: Style::default().fg(Color::DarkGray),
            input_border_focused_style: Style::default().fg(Color::Cyan),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_placeholder_style: Style::default().fg(Color::DarkGray),

            button_style: Style::default().fg(Color::Cyan),
            button_focused_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            loader_style: Style::default().fg(Color::Yellow),

            results_border_style: Style::default().fg(Color::DarkGray),
            scene_text_style: Style::default().fg(Color::White),
            error_text_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            separator_style: Style::default().fg(Color::DarkGray),

            notice_border_style: Style::default().fg(Color::Yellow),
            notice_text_style: Style::default().fg(Color::White),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
