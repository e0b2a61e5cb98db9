use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use talentforge_core::news::NewsStatus;
use talentforge_core::toast::ToastPhase;
use talentforge_core::weather::WeatherView;
use talentforge_core::wrap::{cursor_position, display_width, wrap_chars, wrap_words};
use talentforge_core::{ChatRole, InputTarget, MessageId, ThemeMode, ViewMode, SUGGESTIONS};

use crate::app::{App, Focus, HitAreas};
use crate::keymap::Action;

/// Layout units per terminal column.
const UNITS_PER_COLUMN: u16 = 8;

const SIDEBAR_WIDTH: u16 = 34;
const WELCOME_WIDTH: u16 = 76;
const SEND_WIDTH: u16 = 8;
const TOAST_WIDTH: u16 = 42;
const WEATHER_HEIGHT: u16 = 9;

const ASSISTANT_LABEL: &str = "TalentForge:";
const COPY_LABEL: &str = "[copy]";

struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    user: Color,
    assistant: Color,
    border: Color,
    focus: Color,
    bar: Color,
}

impl Palette {
    fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                user: Color::Cyan,
                assistant: Color::Yellow,
                border: Color::DarkGray,
                focus: Color::Yellow,
                bar: Color::DarkGray,
            },
            ThemeMode::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                user: Color::Blue,
                assistant: Color::Magenta,
                border: Color::Gray,
                focus: Color::Blue,
                bar: Color::Gray,
            },
        }
    }
}

fn text_width(text: &str) -> u16 {
    display_width(text).min(u16::MAX as usize) as u16
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let palette = Palette::for_mode(app.dashboard.theme());
    app.areas = HitAreas::default();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    let conversation = app.dashboard.view_mode() == ViewMode::Conversation;

    // Main layout: header, body, footer (the footer appears with the conversation)
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(if conversation { 1 } else { 0 }),
    ])
    .areas(area);

    render_header(app, frame, header_area, &palette);

    let sidebar_width = if app.dashboard.layout().sidebar_open() {
        SIDEBAR_WIDTH.min(body_area.width / 2)
    } else {
        0
    };
    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .areas(body_area);

    if sidebar_width > 0 {
        render_sidebar(app, frame, sidebar_area, &palette);
    }

    if conversation {
        render_conversation(app, frame, main_area, &palette);
        render_footer(app, frame, footer_area, &palette);
    } else {
        render_welcome(app, frame, main_area, &palette);
    }

    render_toasts(app, frame, area, &palette);
}

fn render_header(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let layout = app.dashboard.layout();
    let toggle = if layout.sidebar_open() { " ◂ " } else { " ▸ " };
    let offset = (layout.header_title_offset() / UNITS_PER_COLUMN) as usize;

    let theme_label = match app.dashboard.theme() {
        ThemeMode::Dark => " ☾ Dark ",
        ThemeMode::Light => " ☀ Light ",
    };
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(text_width(theme_label))])
            .areas(area);

    let title = Line::from(vec![
        Span::styled(toggle, Style::default().fg(palette.accent).bold()),
        Span::raw(" ".repeat(offset)),
        Span::styled(" TalentForge AI ", Style::default().fg(palette.accent).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(palette.muted),
        ),
    ]);

    let bar = Style::default().bg(palette.bar).fg(palette.fg);
    frame.render_widget(Paragraph::new(title).style(bar), left);
    frame.render_widget(Paragraph::new(theme_label).style(bar), right);

    app.areas.sidebar_toggle = Some(Rect::new(left.x, left.y, text_width(toggle).min(left.width), 1));
    app.areas.theme_toggle = Some(right);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let (mode_text, mode_style) = match app.focus {
        Focus::Input => (" CHAT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
        Focus::Transcript => (" TRANSCRIPT ", Style::default().bg(Color::Blue).fg(Color::White)),
        Focus::Suggestions => (" SUGGESTIONS ", Style::default().bg(Color::Magenta).fg(Color::White)),
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(palette.bg).fg(palette.fg);

    let mut hints: Vec<(String, &str)> = match app.focus {
        Focus::Input => vec![
            ("Enter".to_string(), "send"),
            ("M-Enter".to_string(), "newline"),
            ("Esc".to_string(), "transcript"),
        ],
        Focus::Transcript => vec![
            ("j/k".to_string(), "reply"),
            ("c".to_string(), "copy"),
            ("g/G".to_string(), "top/bottom"),
            ("i".to_string(), "type"),
        ],
        Focus::Suggestions => vec![
            ("j/k".to_string(), "nav"),
            ("Enter".to_string(), "use"),
        ],
    };

    let global = [
        (Action::CycleFocus, "focus"),
        (Action::ToggleSidebar, "sidebar"),
        (Action::ToggleTheme, "theme"),
        (Action::NewChat, "new chat"),
        (Action::Quit, "quit"),
    ];
    hints.extend(
        global
            .into_iter()
            .filter_map(|(action, label)| Some((app.keymap.hint(action)?, label))),
    );

    let spans: Vec<Span> = std::iter::once(Span::styled(mode_text, mode_style))
        .chain(std::iter::once(Span::styled(" ", label_style)))
        .chain(hints.into_iter().flat_map(|(key, label)| {
            [
                Span::styled(format!(" {key} "), key_style),
                Span::styled(format!(" {label} "), label_style),
            ]
        }))
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bg)),
        area,
    );
}

fn render_welcome(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let width = WELCOME_WIDTH.min(area.width);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);

    let input_rows = prepare_input(app, InputTarget::Welcome, column.width);
    let [greeting_area, suggestions_area, input_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(SUGGESTIONS.len() as u16 + 2),
        Constraint::Length(input_rows + 2),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .spacing(1)
    .areas(column);

    let greeting = Text::from(vec![
        Line::from(Span::styled(
            app.dashboard.greeting(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "How can I help with your career today?",
            Style::default().fg(palette.muted),
        )),
    ]);
    frame.render_widget(
        Paragraph::new(greeting).alignment(Alignment::Center),
        greeting_area,
    );

    render_suggestions(app, frame, suggestions_area, palette);
    render_input(app, frame, input_area, InputTarget::Welcome, palette);

    let hint = format!(
        "Enter send · M-Enter newline · Tab focus · {} sidebar · {} theme · ^C quit",
        app.keymap.hint(Action::ToggleSidebar).unwrap_or_default(),
        app.keymap.hint(Action::ToggleTheme).unwrap_or_default(),
    );
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(palette.muted)))
            .alignment(Alignment::Center),
        hint_area,
    );
}

fn render_conversation(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let input_rows = prepare_input(app, InputTarget::Chat, area.width);
    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(input_rows + 2)]).areas(area);

    render_transcript(app, frame, transcript_area, palette);
    render_input(app, frame, input_area, InputTarget::Chat, palette);
}

/// Report the input's inner width and return the rows it wants.
fn prepare_input(app: &mut App, target: InputTarget, width: u16) -> u16 {
    let inner = width.saturating_sub(SEND_WIDTH + 2) as usize;
    app.dashboard.set_input_wrap_width(target, inner);
    app.dashboard.inputs().widget(target).rows()
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let viewport = area.height.saturating_sub(2);
    let focused = app.focus == Focus::Transcript;

    let mut lines: Vec<Line> = Vec::new();
    let mut message_rows: Vec<(MessageId, u16)> = Vec::new();
    let mut copy_rows: Vec<(u16, MessageId)> = Vec::new();

    for msg in app.dashboard.session().messages() {
        let row = lines.len() as u16;
        message_rows.push((msg.id, row));

        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(palette.user).add_modifier(Modifier::BOLD),
                )));
            }
            ChatRole::Assistant => {
                let selected = app.selected_reply == Some(msg.id);
                let mut label_style = Style::default().fg(palette.assistant).add_modifier(Modifier::BOLD);
                if selected && focused {
                    label_style = label_style.add_modifier(Modifier::REVERSED);
                }
                let mut header = vec![Span::styled(ASSISTANT_LABEL, label_style)];
                if msg.is_copyable() {
                    header.push(Span::raw(" "));
                    header.push(Span::styled(COPY_LABEL, Style::default().fg(palette.muted)));
                    copy_rows.push((row, msg.id));
                }
                lines.push(Line::from(header));
            }
        }

        if msg.is_pending() {
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Thinking{dots}"),
                Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
            )));
        } else {
            lines.extend(wrap_words(&msg.content, inner_width).into_iter().map(Line::from));
        }
        lines.push(Line::default());
    }

    app.message_rows = message_rows;
    app.dashboard.layout_transcript(viewport, lines.len() as u16);

    let scroll = app.dashboard.scroll();
    let offset = scroll.offset();
    let mut title = vec![Span::raw(" Conversation ")];
    if !scroll.is_at_bottom() {
        title.push(Span::styled("↓ more below ", Style::default().fg(palette.accent)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.focus } else { palette.border }))
        .title(Line::from(title));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(block).scroll((offset, 0)),
        area,
    );

    let copy_col = text_width(ASSISTANT_LABEL) + 1;
    app.areas.transcript = Some(area);
    app.areas.copy = copy_rows
        .into_iter()
        .filter(|(row, _)| *row >= offset && *row < offset + viewport)
        .filter(|_| copy_col + text_width(COPY_LABEL) <= inner_width as u16)
        .map(|(row, id)| {
            let rect = Rect::new(
                area.x + 1 + copy_col,
                area.y + 1 + row - offset,
                text_width(COPY_LABEL),
                1,
            );
            (rect, id)
        })
        .collect();
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect, target: InputTarget, palette: &Palette) {
    let [box_area, send_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(SEND_WIDTH)]).areas(area);

    let widget = app.dashboard.inputs().widget(target);
    let focused = app.focus == Focus::Input;
    let inner_width = box_area.width.saturating_sub(2) as usize;
    let visible_rows = box_area.height.saturating_sub(2);

    let (cursor_row, cursor_col) = cursor_position(widget.value(), widget.cursor(), inner_width);
    let scroll = cursor_row.saturating_sub(visible_rows.saturating_sub(1));

    let text = if widget.value().is_empty() {
        Text::from(Span::styled(
            "Ask about interviews, resumes or your job search...",
            Style::default().fg(palette.muted),
        ))
    } else {
        Text::from(
            wrap_chars(widget.value(), inner_width)
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>(),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.focus } else { palette.border }))
        .title(" Message ");
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(palette.user))
            .block(block)
            .scroll((scroll, 0)),
        box_area,
    );

    let send_style = if widget.submit_enabled() {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    frame.render_widget(
        Paragraph::new("Send")
            .alignment(Alignment::Center)
            .style(send_style)
            .block(Block::default().borders(Borders::ALL).border_style(send_style)),
        send_area,
    );

    if focused && inner_width > 0 {
        frame.set_cursor_position((
            box_area.x + 1 + cursor_col,
            box_area.y + 1 + cursor_row - scroll,
        ));
    }

    app.areas.input = Some(box_area);
    app.areas.send = Some(send_area);
}

fn render_suggestions(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let focused = app.focus == Focus::Suggestions;
    let lines: Vec<Line> = SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let style = if focused && idx == app.suggestion_idx {
                Style::default().bg(palette.accent).fg(palette.bg)
            } else {
                Style::default().fg(palette.fg)
            };
            Line::from(vec![
                Span::styled(format!(" {} ", idx + 1), Style::default().fg(palette.accent)),
                Span::styled(text.to_string(), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.focus } else { palette.border }))
        .title(" Suggestions ");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let inner_height = area.height.saturating_sub(2);
    app.areas.suggestions = (0..SUGGESTIONS.len() as u16)
        .filter(|row| *row < inner_height)
        .map(|row| {
            let rect = Rect::new(area.x + 1, area.y + 1 + row, area.width.saturating_sub(2), 1);
            (rect, row as usize)
        })
        .collect();
}

fn render_sidebar(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let conversation = app.dashboard.view_mode() == ViewMode::Conversation;
    let suggestions_height = if conversation {
        SUGGESTIONS.len() as u16 + 2
    } else {
        0
    };

    let [weather_area, news_area, suggestions_area] = Layout::vertical([
        Constraint::Length(WEATHER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(suggestions_height),
    ])
    .areas(area);

    render_weather(app, frame, weather_area, palette);
    render_news(app, frame, news_area, palette);
    if conversation {
        render_suggestions(app, frame, suggestions_area, palette);
    }
}

fn render_weather(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let muted = Style::default().fg(palette.muted);
    let mut lines = match app.dashboard.weather().view() {
        WeatherView::Loading => vec![Line::from(Span::styled("Loading weather...", muted))],
        WeatherView::Ready(report) => vec![
            Line::from(Span::styled(
                format!("{}, {}", report.location, report.region),
                Style::default().bold(),
            )),
            Line::from(vec![
                Span::styled(
                    format!("{}°C", report.temp_c),
                    Style::default().fg(palette.accent).bold(),
                ),
                Span::raw(format!("  {}", report.condition)),
            ]),
            Line::from(Span::styled(format!("Feels like {}", report.feels_like), muted)),
            Line::from(Span::styled(
                format!("Humidity {}  Wind {}", report.humidity, report.wind),
                muted,
            )),
            Line::from(Span::styled(format!("UV {}", report.uv), muted)),
        ],
    };

    let inner_height = area.height.saturating_sub(2);
    while (lines.len() as u16) < inner_height.saturating_sub(1) {
        lines.push(Line::default());
    }

    const REFRESH: &str = "[Refresh]";
    const LOCATE: &str = "[Locate]";
    lines.push(Line::from(vec![
        Span::styled(REFRESH, Style::default().fg(palette.accent)),
        Span::raw(" "),
        Span::styled(LOCATE, Style::default().fg(palette.accent)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Weather ");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if inner_height > 0 {
        let row = area.y + inner_height;
        app.areas.weather_refresh = Some(Rect::new(area.x + 1, row, text_width(REFRESH), 1));
        app.areas.weather_locate = Some(Rect::new(
            area.x + 2 + text_width(REFRESH),
            row,
            text_width(LOCATE),
            1,
        ));
    }
}

fn render_news(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let news = app.dashboard.news();
    let muted = Style::default().fg(palette.muted);

    let lines: Vec<Line> = if news.items().is_empty() {
        let message = match news.status() {
            NewsStatus::Loading => "Loading news...",
            NewsStatus::Loaded => "No headlines right now.",
            NewsStatus::Failed => "News unavailable.",
        };
        vec![Line::from(Span::styled(message, muted))]
    } else {
        news.items()
            .iter()
            .flat_map(|item| {
                [
                    Line::from(Span::styled(item.title.clone(), Style::default().bold())),
                    Line::from(Span::styled(item.source.clone(), muted)),
                    Line::default(),
                ]
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Tech News ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_toasts(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let width = TOAST_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2) as usize;
    let mut y = area.y + 1;

    for toast in app.dashboard.toasts().toasts() {
        let description = wrap_words(&toast.description, inner_width);
        let height = description.len().min(3) as u16 + 3;
        if y + height > area.bottom() {
            break;
        }

        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, height);
        let (text_style, border_style) = match toast.phase {
            ToastPhase::Visible => (
                Style::default().fg(palette.fg),
                Style::default().fg(palette.accent),
            ),
            ToastPhase::Fading => (
                Style::default().fg(palette.muted),
                Style::default().fg(palette.muted),
            ),
        };

        let mut lines = vec![Line::from(Span::styled(
            toast.title.clone(),
            text_style.add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            description
                .into_iter()
                .take(3)
                .map(|row| Line::from(Span::styled(row, text_style))),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().bg(palette.bg))
                .block(Block::default().borders(Borders::ALL).border_style(border_style)),
            rect,
        );
        y += height;
    }
}
