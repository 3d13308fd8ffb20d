use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::globe::projection::CULL_FRONT;
use crate::globe::scene::HOTSPOTS;
use crate::globe::Projector;
use crate::surface::Surface;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into globe area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Globe
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_globe(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_globe(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Grid Globe ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let widget = GlobeWidget {
        background: app.show_starfield.then(|| app.background_surface.canvas()),
        globe: app.globe_surface.canvas(),
        labels: hotspot_labels(app),
    };
    frame.render_widget(widget, inner);
}

/// Project hotspot labels to character coordinates next to their
/// markers. Host-side overlay; the projection is pure so re-running it
/// here costs eight points per frame.
fn hotspot_labels(app: &App) -> Vec<(u16, u16, &'static str)> {
    if !app.show_labels {
        return Vec::new();
    }
    let Some(rotation) = app.engine.rotation() else {
        return Vec::new();
    };

    let (pw, ph) = app.globe_surface.size();
    let projector = Projector::new(pw, ph);

    HOTSPOTS
        .iter()
        .filter_map(|city| {
            let p = projector.project_deg(city.point.lat, city.point.lon, rotation, CULL_FRONT);
            if !p.visible || p.x < 0.0 || p.y < 0.0 {
                return None;
            }
            // Braille pixels -> character cell, shifted right of the marker
            let cx = (p.x / 2.0) as u16 + 2;
            let cy = (p.y / 4.0) as u16;
            Some((cx, cy, city.label))
        })
        .collect()
}

/// Blits the braille layers back-to-front: starfield behind, globe in
/// front. Intensity levels map to the layer's color ramp.
struct GlobeWidget<'a> {
    background: Option<&'a BrailleCanvas>,
    globe: &'a BrailleCanvas,
    labels: Vec<(u16, u16, &'static str)>,
}

/// Color ramp for the starfield layer
fn background_style(level: u8) -> Style {
    match level {
        1 => Style::default().fg(Color::DarkGray),
        2 => Style::default().fg(Color::Gray),
        _ => Style::default().fg(Color::White),
    }
}

/// Color ramp for the globe layer (brand lime)
fn globe_style(level: u8) -> Style {
    match level {
        1 => Style::default().fg(Color::DarkGray),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::LightGreen),
        _ => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    }
}

impl GlobeWidget<'_> {
    fn render_layer(
        canvas: &BrailleCanvas,
        style_for: fn(u8) -> Style,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let rows = canvas.height().min(area.height as usize);
        let cols = canvas.width().min(area.width as usize);
        for cy in 0..rows {
            for cx in 0..cols {
                let (ch, level) = canvas.cell(cx, cy);
                if level == 0 {
                    continue;
                }
                let x = area.x + cx as u16;
                let y = area.y + cy as u16;
                buf[(x, y)].set_char(ch).set_style(style_for(level));
            }
        }
    }
}

impl Widget for GlobeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(background) = self.background {
            Self::render_layer(background, background_style, area, buf);
        }
        Self::render_layer(self.globe, globe_style, area, buf);

        let label_style = Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD);
        for &(cx, cy, label) in &self.labels {
            let x = area.x + cx;
            let y = area.y + cy;
            if y >= area.y + area.height || x + label.len() as u16 > area.x + area.width {
                continue;
            }
            buf.set_string(x, y, label, label_style);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = Line::from(vec![
        Span::styled(" State: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.phase_label(), Style::default().fg(Color::Yellow)),
        Span::styled(" | Yaw: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:.1}°", app.yaw_degrees()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if app.show_starfield { "[S]tars " } else { "[s]tars " },
            Style::default().fg(if app.show_starfield {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            if app.show_labels { "[L]abels " } else { "[l]abels " },
            Style::default().fg(if app.show_labels {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            "| space:off-screen q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(status);
    frame.render_widget(paragraph, area);
}
