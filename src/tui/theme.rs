use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Theme {
    pub name: String,
    pub header_style: Style,
    pub footer_style: Style,
    pub input_style: Style,
    pub button_style: Style,
    pub map_border_style: Style,
    pub center_color: Color,
    pub marker_color: Color,
    pub marker_label_style: Style,
    pub active_marker_color: Color,
    pub active_marker_label_style: Style,
    pub list_style: Style,
    pub list_selected_style: Style,
    pub popup_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            header_style: Style::default().fg(Color::Cyan),
            footer_style: Style::default().fg(Color::Cyan),
            input_style: Style::default().fg(Color::White),
            button_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            map_border_style: Style::default().fg(Color::Gray),
            center_color: Color::DarkGray,
            marker_color: Color::Yellow,
            marker_label_style: Style::default().fg(Color::Yellow),
            active_marker_color: Color::LightRed,
            active_marker_label_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            list_style: Style::default().fg(Color::White),
            list_selected_style: Style::default().bg(Color::DarkGray).fg(Color::White),
            popup_style: Style::default().fg(Color::White),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            header_style: Style::default().fg(Color::Blue),
            footer_style: Style::default().fg(Color::Blue),
            input_style: Style::default().fg(Color::Black),
            button_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            map_border_style: Style::default().fg(Color::DarkGray),
            center_color: Color::Gray,
            marker_color: Color::Magenta,
            marker_label_style: Style::default().fg(Color::Magenta),
            active_marker_color: Color::Red,
            active_marker_label_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            list_style: Style::default().fg(Color::Black),
            list_selected_style: Style::default().bg(Color::Gray).fg(Color::Black),
            popup_style: Style::default().fg(Color::Black),
        }
    }

    /// Unknown names fall back to dark.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}
