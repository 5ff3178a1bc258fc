mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup};
use crate::stylist::StyleCategory;
use components::{centered_rect, control_block, popup_block};

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(2), // Title
            Constraint::Length(3), // Upload section
            Constraint::Min(3),    // Response
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_title(f, app, chunks[1]);
    draw_upload_section(f, app, chunks[2]);
    if let Some(response) = app.form.response() {
        draw_response_box(f, app, response, chunks[3]);
    }
    draw_footer(f, app, chunks[4]);

    match app.popup {
        Popup::None => {}
        Popup::FileBrowser => draw_file_browser(f, app),
        Popup::StyleMenu => draw_style_menu(f, app),
        Popup::Help => draw_help_popup(f, app),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let line = match app.status_message {
        Some(ref status) => {
            let color = if app.status_is_error { t.danger } else { t.accent };
            Line::from(Span::styled(status, Style::default().fg(color)))
        }
        None => Line::from(Span::styled("Ready", Style::default().fg(t.text_dim))),
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let title = Paragraph::new(Line::from(Span::styled(
        "AI Stylist",
        Style::default().fg(t.header).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(t.inactive)),
    );
    f.render_widget(title, area);
}

fn draw_upload_section(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Image picker
            Constraint::Percentage(25), // Style dropdown
            Constraint::Percentage(30), // Analyze button
        ])
        .split(area);

    // Image picker
    let image_style = if app.form.image().is_some() {
        Style::default().fg(t.text)
    } else {
        Style::default().fg(t.text_dim)
    };
    let image = Paragraph::new(Line::from(vec![
        Span::styled("󰋩 ", Style::default().fg(t.accent)),
        Span::styled(app.form.image_label(), image_style),
    ]))
    .block(control_block(" (i)mage ", app.focus == Focus::Image, t));
    f.render_widget(image, chunks[0]);

    // Style dropdown (closed)
    let dropdown = Paragraph::new(Line::from(vec![
        Span::styled(app.form.style().label(), Style::default().fg(t.text)),
        Span::styled(" ▾", Style::default().fg(t.text_dim)),
    ]))
    .block(control_block(" (s)tyle ", app.focus == Focus::Style, t));
    f.render_widget(dropdown, chunks[1]);

    // Analyze button
    let focused = app.focus == Focus::Analyze;
    let button_style = if focused {
        Style::default()
            .fg(t.accent)
            .bg(t.bg_selected)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.text)
    };
    let button = Paragraph::new(Span::styled("Analyze Style", button_style))
        .alignment(Alignment::Center)
        .block(control_block(" (a) ", focused, t));
    f.render_widget(button, chunks[2]);
}

fn draw_response_box(f: &mut Frame, app: &App, response: &str, area: Rect) {
    let t = &app.theme;
    let block = Block::default()
        .title(Span::styled(" Response ", Style::default().fg(t.success)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.success));

    let content = Paragraph::new(Span::styled(response, Style::default().fg(t.text)))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let hints: &[(&str, &str)] = match app.popup {
        Popup::FileBrowser => &[("j/k", "nav"), ("Enter", "select"), ("Backspace", "up"), ("Esc", "cancel")],
        Popup::StyleMenu => &[("j/k", "nav"), ("Enter", "select"), ("Esc", "cancel")],
        Popup::Help => &[("Esc", "close")],
        Popup::None => &[("Tab", "focus"), ("Enter", "activate"), ("a", "analyze"), ("?", "help"), ("q", "quit")],
    };

    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let sep = if i + 1 < hints.len() { " │ " } else { "" };
            vec![
                Span::styled(*key, Style::default().fg(t.accent)),
                Span::styled(format!(" {}{}", action, sep), Style::default().fg(t.text_dim)),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_file_browser(f: &mut Frame, app: &App) {
    let Some(browser) = app.browser.as_ref() else {
        return;
    };
    let t = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 90 } else { 70 },
        if area.height < 30 { 85 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(popup_block(" 󰋩 Choose an image ", t), popup_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(popup_area);

    let path_str = browser.path.to_string_lossy();
    let path_display = Paragraph::new(Line::from(vec![
        Span::styled("󰉋 ", Style::default().fg(t.accent)),
        Span::styled(path_str.as_ref(), Style::default().fg(t.text)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(t.inactive)));
    f.render_widget(path_display, inner[0]);

    let rows: Vec<Row> = if browser.entries.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  No images in this directory",
            Style::default().fg(t.text_dim),
        )])]
    } else {
        browser
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let icon = if entry.is_dir { "󰉋" } else { "󰋩" };
                let icon_color = if entry.is_dir { t.accent } else { t.success };

                let row_style = if i == browser.selected {
                    Style::default().bg(t.bg_selected).fg(t.text)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    Span::styled(format!("  {} ", icon), Style::default().fg(icon_color)),
                    Span::styled(entry.name.as_str(), Style::default().fg(t.text)),
                ])
                .style(row_style)
            })
            .collect()
    };

    // Keep the highlighted row on screen in long directories
    let visible = inner[1].height as usize;
    let skip = browser.selected.saturating_sub(visible.saturating_sub(1));
    let rows: Vec<Row> = rows.into_iter().skip(skip).collect();

    let widths = [Constraint::Length(5), Constraint::Percentage(90)];
    f.render_widget(Table::new(rows, widths), inner[1]);
}

fn draw_style_menu(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let height = StyleCategory::ALL.len() as u16 + 2;
    let width = 24u16.min(area.width);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    };

    f.render_widget(Clear, popup_area);

    let current = app.form.style();
    let lines: Vec<Line> = StyleCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, style)| {
            let marker = if *style == current { "● " } else { "  " };
            let line_style = if i == app.style_menu_selected {
                Style::default().bg(t.bg_selected).fg(t.text)
            } else {
                Style::default().fg(t.text)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(t.accent)),
                Span::raw(style.label()),
            ])
            .style(line_style)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(popup_block(" Style ", t)), popup_area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 30 { 95 } else { 80 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(t.header).add_modifier(Modifier::BOLD),
        ))
    };
    let key = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), Style::default().fg(t.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("═══ Form ═══"),
        key("Tab", "Move between image, style and Analyze"),
        key("Enter", "Activate the focused control"),
        key("i", "Choose an image"),
        key("s", "Choose a style"),
        key("←/→", "Cycle style when it has focus"),
        key("a", "Analyze style"),
        Line::from(""),
        section("═══ Image Picker ═══"),
        key("j/k", "Move up/down"),
        key("Enter", "Open directory or pick image"),
        key("Backspace", "Parent directory"),
        key("h/~", "Home directory"),
        key(".", "Show/hide hidden files"),
        key("Esc", "Cancel, keep current image"),
        Line::from(""),
        section("═══ Quick Start ═══"),
        key("stylist", "Launch this TUI"),
        Line::from(vec![Span::styled(
            "  stylist --analyze --image shirt.png --style formal",
            Style::default().fg(t.text_dim),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(t.text_dim)),
            Span::styled("?", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("Esc", Style::default().fg(t.accent)),
            Span::styled(" to close", Style::default().fg(t.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(popup_block(" 󰋖 stylist Help ", t))
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}
