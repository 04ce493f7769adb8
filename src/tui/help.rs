use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(pad),
        Span::raw(action),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        key_line("Enter", "        ", "Analyze the URL in the input field"),
        key_line("Ctrl-E", "       ", "Export latest result as CSV"),
        key_line("Ctrl-Y", "       ", "Copy exported path to clipboard"),
        key_line("Ctrl-U", "       ", "Clear the input field"),
        key_line("↑/↓", "          ", "Scroll results"),
        key_line("tab", "          ", "Switch tabs"),
        key_line("Esc", "          ", "Quit (also Ctrl-C)"),
        Line::from(""),
        Line::from("Results stay on screen until the next successful analysis."),
        Line::from("Submitting is disabled while a request is in flight."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
