use std::borrow::Cow;

use chrono::{DateTime, Utc};
use office_dashboard_core::card::{
    ACCELERIT, ClockCard, HEADER, PromoPanel, RENTSHOP, RiverCard, TRANSIT_LOADING, TransitCard,
};
use office_dashboard_core::river::RiverReading;
use office_dashboard_fetcher::{TransitBoard, WidgetState};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

const MUTED: Color = Color::Rgb(226, 232, 240);
const BRIGHT: Color = Color::Rgb(248, 250, 252);
const ERROR: Color = Color::Rgb(254, 205, 211);

/// Everything one frame shows, computed before drawing.
pub(crate) struct Dashboard {
    clock: ClockCard,
    river: RiverCard,
    transit: TransitCard,
}

impl Dashboard {
    pub(crate) fn new(
        now: DateTime<Utc>,
        river: &WidgetState<RiverReading>,
        transit: &WidgetState<TransitBoard>,
    ) -> Self {
        Self {
            clock: ClockCard::new(now),
            river: RiverCard::new(&river.data, river.error.as_deref()),
            transit: TransitCard::new(
                &transit.data.station_name,
                &transit.data.departures,
                transit.is_loading(),
                transit.error.as_deref(),
                transit.last_update,
                now,
            ),
        }
    }
}

/// Maps a palette name used by the view models to a terminal color.
fn palette(name: &str) -> Color {
    match name {
        "sky" => Color::Rgb(186, 230, 253),
        "emerald" => Color::Rgb(167, 243, 208),
        "amber" => Color::Rgb(253, 230, 138),
        "rose" => Color::Rgb(254, 205, 211),
        "violet" => Color::Rgb(196, 181, 253),
        "orange" => Color::Rgb(253, 186, 116),
        _ => MUTED,
    }
}

/// Turns an `rgba(r,g,b,a)` glow token into its opaque color.
fn glow_color(glow: &str) -> Option<Color> {
    let inner = glow.strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut channels = inner.split(',').map(|part| part.trim().parse::<u8>());
    match (channels.next(), channels.next(), channels.next()) {
        (Some(Ok(r)), Some(Ok(g)), Some(Ok(b))) => Some(Color::Rgb(r, g, b)),
        _ => None,
    }
}

fn panel(title: &str, accent: Color) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(accent))
        .title(Span::styled(
            format!(" {} ", title.to_uppercase()),
            Style::new().fg(MUTED),
        ))
}

fn caption<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    Line::from(Span::styled(text, Style::new().fg(MUTED)))
}

pub(crate) fn draw(frame: &mut Frame, dashboard: &Dashboard) {
    let [header, top, bottom, footer] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(12),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, &dashboard.clock);

    let [left, center, right] = Layout::horizontal([
        Constraint::Ratio(11, 32),
        Constraint::Ratio(10, 32),
        Constraint::Ratio(11, 32),
    ])
    .areas(top);
    draw_promo(frame, left, &ACCELERIT);
    draw_river(frame, center, &dashboard.river);
    draw_promo(frame, right, &RENTSHOP);

    draw_transit(frame, bottom, &dashboard.transit);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("──── {}", HEADER.footer.to_uppercase()),
            Style::new().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right),
        footer,
    );
}

fn draw_header(frame: &mut Frame, area: Rect, clock: &ClockCard) {
    let [title, time] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(42)]).areas(area);

    let lines = vec![
        caption(HEADER.caption.to_uppercase()),
        Line::from(Span::styled(
            HEADER.title,
            Style::new().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        caption(HEADER.subtitle),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), title);

    let lines = vec![
        caption(clock.caption),
        Line::from(Span::styled(
            clock.time.as_str(),
            Style::new().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        caption(clock.date.as_str()),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(Block::bordered().border_type(BorderType::Rounded)),
        time,
    );
}

fn draw_promo(frame: &mut Frame, area: Rect, promo: &PromoPanel) {
    let accent = palette(promo.accent);
    let mut lines = vec![
        Line::from(Span::styled(
            promo.headline,
            Style::new().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(promo.blurb),
        Line::default(),
    ];
    lines.push(Line::from(
        promo
            .tags
            .iter()
            .flat_map(|tag| {
                [
                    Span::styled(format!("[{tag}]"), Style::new().fg(accent)),
                    Span::raw(" "),
                ]
            })
            .collect::<Vec<_>>(),
    ));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel(promo.brand, accent)),
        area,
    );
}

fn draw_river(frame: &mut Frame, area: Rect, river: &RiverCard) {
    let accent = palette(river.mood.color);
    let glow = glow_color(river.mood.glow).unwrap_or(accent);

    let mut lines = vec![
        Line::from(Span::styled(
            river.location.as_str(),
            Style::new().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            river.temperature_with_unit(),
            Style::new().fg(glow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            river.mood.label.to_uppercase(),
            Style::new().fg(accent),
        )),
        Line::default(),
    ];
    if let Some(error) = &river.error {
        lines.push(Line::from(Span::styled(error.as_str(), Style::new().fg(ERROR))));
    }
    lines.push(caption(format!("Letztes Update: {}", river.last_update)));
    lines.push(caption(format!("Datenquelle: {}", river.source)));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(panel(river.title, glow)),
        area,
    );
}

fn draw_transit(frame: &mut Frame, area: Rect, transit: &TransitCard) {
    let mut lines = vec![
        Line::from(Span::styled(
            transit.station_name.as_str(),
            Style::new().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if transit.loading {
        lines.push(caption(TRANSIT_LOADING));
    } else {
        for row in &transit.rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<6} ", row.line),
                    Style::new().fg(BRIGHT).add_modifier(Modifier::REVERSED),
                ),
                Span::raw(format!(" {:<28} ", row.destination)),
                Span::styled(format!("{:<10}", row.platform), Style::new().fg(MUTED)),
                Span::styled(
                    format!("{:>6}", row.time),
                    Style::new().fg(BRIGHT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", row.relative), Style::new().fg(MUTED)),
            ]));
        }
    }

    lines.push(Line::default());
    if let Some(error) = &transit.error {
        lines.push(Line::from(Span::styled(error.as_str(), Style::new().fg(ERROR))));
    }
    lines.push(caption(format!("Letztes Update: {}", transit.last_update)));
    lines.push(caption(format!("Datenquelle: {}", transit.source)));

    frame.render_widget(
        Paragraph::new(lines).block(panel(transit.title, palette("sky"))),
        area,
    );
}
