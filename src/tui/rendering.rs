use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Wrap,
        canvas::{Canvas, Points},
    },
};

use crate::map::{MAP_CENTER, MapWidget, MarkerLayer};
use crate::tui::state::{MapApp, truncate_display};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const BUTTON_LABEL: &str = "[ Search ]";

impl MapApp {
    pub fn view(&mut self, f: &mut Frame, layer: &MarkerLayer, in_flight: usize) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Search row
                Constraint::Min(5),    // Map + marker list
                Constraint::Length(1), // Footer
            ])
            .split(size);

        self.render_header(f, chunks[0], layer, in_flight);
        self.render_search_row(f, chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(32)])
            .split(chunks[2]);
        self.render_map(f, body[0], layer);
        self.render_marker_list(f, body[1], layer);
        self.list_area = body[1];
        self.render_footer(f, chunks[3]);

        self.render_popup(f, body[0], layer);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, layer: &MarkerLayer, in_flight: usize) {
        let status = if in_flight > 0 {
            format!(
                "Searching {} ({in_flight} pending)",
                SPINNER[self.spinner_state % SPINNER.len()]
            )
        } else {
            format!("{} marker(s)", layer.markers().len())
        };
        let text = truncate_display(
            &format!("{} | {status}", self.title),
            area.width as usize,
        );
        f.render_widget(Paragraph::new(text).style(self.theme.header_style), area);
    }

    fn render_search_row(&mut self, f: &mut Frame, area: Rect) {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(BUTTON_LABEL.len() as u16 + 2),
            ])
            .split(area);

        f.render_widget(&self.textarea, row[0]);

        let button = Paragraph::new(BUTTON_LABEL)
            .style(self.theme.button_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, row[1]);
        self.button_area = row[1];
    }

    fn render_map(&self, f: &mut Frame, area: Rect, layer: &MarkerLayer) {
        let theme = &self.theme;
        let active = layer.active();
        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.map_border_style)
                    .title("Map"),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds(self.bounds.x_bounds())
            .y_bounds(self.bounds.y_bounds())
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &[(MAP_CENTER.lng, MAP_CENTER.lat)],
                    color: theme.center_color,
                });
                ctx.layer();
                for (i, m) in layer.markers().iter().enumerate() {
                    if !self.bounds.contains(m.position) {
                        continue;
                    }
                    let is_active = active == Some(i);
                    let (color, label_style) = if is_active {
                        (theme.active_marker_color, theme.active_marker_label_style)
                    } else {
                        (theme.marker_color, theme.marker_label_style)
                    };
                    ctx.draw(&Points {
                        coords: &[(m.position.lng, m.position.lat)],
                        color,
                    });
                    ctx.print(
                        m.position.lng,
                        m.position.lat,
                        Span::styled(format!("◆{}", i + 1), label_style),
                    );
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_marker_list(&self, f: &mut Frame, area: Rect, layer: &MarkerLayer) {
        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = layer
            .markers()
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let line = truncate_display(&format!("{}. {}", i + 1, m.title), width);
                let style = if layer.active() == Some(i) {
                    self.theme.list_selected_style
                } else {
                    self.theme.list_style
                };
                ListItem::new(line).style(style)
            })
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Symbols"));
        f.render_widget(list, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let help = "Enter: search  Tab/Shift-Tab/click list: marker info  Esc: close  Ctrl-Q: quit";
        f.render_widget(
            Paragraph::new(truncate_display(help, area.width as usize))
                .style(self.theme.footer_style),
            area,
        );
    }

    fn render_popup(&self, f: &mut Frame, area: Rect, layer: &MarkerLayer) {
        let (Some(index), Some(popup)) = (layer.active(), layer.active_popup()) else {
            return;
        };
        let icon_url = layer
            .markers()
            .get(index)
            .map(|m| m.icon.url.as_str())
            .unwrap_or_default();
        let [name, description, contributor] = popup.lines();
        let text = vec![
            Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(description),
            Line::from(contributor),
            Line::from(""),
            Line::from(Span::styled(
                format!("icon: {icon_url}"),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        let block = Block::default()
            .title(format!("{} (Esc to close)", index + 1))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(self.theme.popup_style)
            .wrap(Wrap { trim: true });

        let popup_area = centered_rect(70, 50, area);
        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
