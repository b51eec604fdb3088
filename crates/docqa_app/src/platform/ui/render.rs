use docqa_core::{
    AppViewModel, ChatView, DashboardView, DocumentRow, DocumentsView, HeaderView, HealthStatus,
    NoticeLevel, StatusView, UploadView, View, ViewBody,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use super::layout::{centered, AppLayout};

const GAUGE_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, layout.header, &view.header);
    render_tabs(frame, layout.tabs, &view.header);

    match &view.body {
        ViewBody::Chat(chat) => render_chat(frame, layout.body, chat),
        ViewBody::Upload(upload) => render_upload(frame, layout.body, upload, view.is_uploading),
        ViewBody::Dashboard(dashboard) => render_dashboard(frame, layout.body, dashboard),
        ViewBody::Documents(documents) => render_documents(frame, layout.body, documents),
    }

    if let Some(notice) = &view.notice {
        let style = match notice.level {
            NoticeLevel::Info => Style::default().fg(Color::Green),
            NoticeLevel::Error => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        let text = Span::styled(format!(" {} ", notice.text), style);
        frame.render_widget(Paragraph::new(Line::from(text)), layout.notice);
    }

    render_status(frame, layout.status, &view.status, view.header.active);

    if view.is_uploading {
        render_upload_overlay(frame, layout.body);
    }
}

fn render_header(frame: &mut Frame, area: Rect, header: &HeaderView) {
    let (health_text, health_style) = match &header.health {
        HealthStatus::Unknown => (
            "backend: checking".to_string(),
            Style::default().fg(Color::Gray),
        ),
        HealthStatus::Reported(health) => {
            let models = if health.models_loaded {
                "models loaded"
            } else {
                "models loading"
            };
            (
                format!("backend: {} ({models})", health.status),
                Style::default().fg(Color::Green),
            )
        }
        HealthStatus::Unreachable(_) => (
            "backend: unreachable".to_string(),
            Style::default().fg(Color::Red),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            " Document Q&A System ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(health_text, health_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, header: &HeaderView) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, tab_title(*view, header))))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(header.active.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    frame.render_widget(tabs, area);
}

fn tab_title(view: View, header: &HeaderView) -> String {
    match view {
        View::Documents => format!("{} ({})", view.title(), header.document_count),
        _ => view.title().to_string(),
    }
}

fn render_chat(frame: &mut Frame, area: Rect, chat: &ChatView) {
    let lines = if chat.ready {
        vec![
            Line::from(Span::styled(
                format!(
                    "{} document{} ready for questions",
                    chat.stats.documents,
                    if chat.stats.documents == 1 { "" } else { "s" }
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(format!("{} chunks indexed", chat.stats.chunks)),
        ]
    } else {
        vec![Line::raw(
            "Please upload some documents first so I can help you with your questions.",
        )]
    };

    let block = Block::default().borders(Borders::ALL).title(" Chat ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_upload(frame: &mut Frame, area: Rect, upload: &UploadView, is_uploading: bool) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .split(area);

    let intro = Text::from(vec![
        Line::raw("Supported formats: .txt, .md, .json, .csv"),
        Line::raw("Maximum file size: 10MB"),
    ]);
    frame.render_widget(Paragraph::new(intro), chunks[0]);

    let input = Paragraph::new(format!("{}_", upload.path_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" File path (Enter to select) "),
    );
    frame.render_widget(input, chunks[1]);

    let pending_lines = match (&upload.pending_name, &upload.pending_size) {
        (Some(name), Some(size)) => {
            let action = if is_uploading {
                Span::styled("Uploading...", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("[Enter] Upload document   [Esc] Remove")
            };
            vec![
                Line::from(vec![
                    Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {size}")),
                ]),
                Line::from(action),
            ]
        }
        _ => vec![Line::styled("No file selected", Style::default().fg(Color::DarkGray))],
    };
    frame.render_widget(
        Paragraph::new(pending_lines)
            .block(Block::default().borders(Borders::ALL).title(" Selected ")),
        chunks[2],
    );

    let help = Text::from(vec![
        Line::raw("How it works:"),
        Line::raw("  - Upload your document (text files, markdown, JSON, CSV)"),
        Line::raw("  - The system will automatically chunk and embed your content"),
        Line::raw("  - The document list refreshes shortly after a successful upload"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::Blue)),
        chunks[3],
    );
}

fn render_dashboard(frame: &mut Frame, area: Rect, dashboard: &DashboardView) {
    let block = Block::default().borders(Borders::ALL).title(" Dashboard ");
    if dashboard.rows.is_empty() {
        frame.render_widget(empty_state(block), area);
        return;
    }

    let header = Row::new(vec!["Filename", "Chunks", "Total Characters"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = dashboard.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.filename.clone()),
            Cell::from(row.chunks.to_string()),
            Cell::from(row.total_chars.to_string()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(60),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

fn render_documents(frame: &mut Frame, area: Rect, documents: &DocumentsView) {
    let title = format!(" Uploaded Documents - {} ", documents.count_label());
    let block = Block::default().borders(Borders::ALL).title(title);
    if documents.rows.is_empty() {
        frame.render_widget(empty_state(block), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(documents.rows.len() * 3 + 3);
    for row in &documents.rows {
        lines.extend(document_lines(row));
    }
    lines.push(Line::styled(
        "Document Statistics",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::raw(format!(
        "Total Documents: {}   Total Chunks: {}   Total Text: {}",
        documents.stats.documents, documents.stats.chunks, documents.total_text
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn document_lines(row: &DocumentRow) -> [Line<'static>; 3] {
    [
        Line::from(vec![
            Span::styled(
                row.filename.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Ready", Style::default().fg(Color::Green)),
        ]),
        Line::raw(format!("  {} chunks   {} text", row.chunks, row.text_size)),
        Line::raw(format!(
            "  {} {} chunks processed",
            fill_bar(row.fill_ratio, GAUGE_WIDTH),
            row.chunks
        )),
    ]
}

fn empty_state(block: Block<'_>) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::styled(
            "No documents uploaded yet",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw("Upload your first document to see it here."),
    ])
    .block(block)
}

fn render_status(frame: &mut Frame, area: Rect, status: &StatusView, active: View) {
    let mut spans = Vec::new();
    if status.refreshes_in_flight > 0 {
        spans.push(Span::styled(" Refreshing... ", Style::default().fg(Color::Yellow)));
    }
    match (&status.last_refresh_error, &status.last_refreshed) {
        (Some(error), _) => spans.push(Span::styled(
            format!(" Refresh failed: {error} "),
            Style::default().fg(Color::Yellow),
        )),
        (None, Some(at)) => spans.push(Span::raw(format!(" Updated {at} "))),
        (None, None) => {}
    }

    let hints = if active == View::Upload {
        " Tab views  Ctrl-U upload  Ctrl-R refresh  Ctrl-C quit"
    } else {
        " Tab/1-4 views  r refresh  Esc dismiss  q quit"
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_upload_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 32, 3);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new("Processing document...").block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

/// Text gauge: `ratio` of `width` cells filled.
fn fill_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use docqa_core::{update, AppState, DocumentSummary, Msg, View};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::{fill_bar, render};

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = state.view();
        terminal.draw(|frame| render(frame, &view)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn with_docs() -> AppState {
        update(
            AppState::new(),
            Msg::RefreshCompleted {
                result: Ok(vec![
                    DocumentSummary::new("guide.md", 4, 2048),
                    DocumentSummary::new("data.csv", 12, 512),
                ]),
                completed_at: "08:15:00".to_string(),
            },
        )
        .0
    }

    #[test]
    fn fill_bar_rounds_and_clamps() {
        assert_eq!(fill_bar(0.0, 4), "[----]");
        assert_eq!(fill_bar(0.5, 4), "[##--]");
        assert_eq!(fill_bar(3.0, 4), "[####]");
    }

    #[test]
    fn documents_tab_label_shows_count() {
        let screen = draw(&with_docs());
        assert!(screen.contains("Documents (2)"));
        assert!(screen.contains("Updated 08:15:00"));
    }

    #[test]
    fn dashboard_lists_every_document() {
        let (state, _) = update(with_docs(), Msg::ViewSelected(View::Dashboard));
        let screen = draw(&state);
        assert!(screen.contains("Total Characters"));
        assert!(screen.contains("guide.md"));
        assert!(screen.contains("data.csv"));
    }

    #[test]
    fn documents_view_shows_statistics() {
        let (state, _) = update(with_docs(), Msg::ViewSelected(View::Documents));
        let screen = draw(&state);
        assert!(screen.contains("2 documents uploaded"));
        assert!(screen.contains("Total Chunks: 16"));
        assert!(screen.contains("2 KB text"));
    }

    #[test]
    fn empty_dashboard_shows_placeholder() {
        let (state, _) = update(AppState::new(), Msg::ViewSelected(View::Dashboard));
        assert!(draw(&state).contains("No documents uploaded yet"));
    }

    #[test]
    fn chat_asks_for_documents_when_empty() {
        assert!(draw(&AppState::new()).contains("Please upload some documents first"));
    }
}
