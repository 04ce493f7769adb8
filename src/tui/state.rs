use crate::session::Session;
use ratatui::{
    style::Color,
    style::Style,
    text::{Line, Span},
};

pub struct UiState {
    pub tab: usize,
    pub info: String,
    /// Contents of the URL input field.
    pub input: String,
    pub session: Session,
    /// Vertical scroll offset of the result regions.
    pub results_scroll: u16,
    pub last_exported_path: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            info: "Enter a company URL and press Enter".into(),
            input: String::new(),
            session: Session::default(),
            results_scroll: 0,
            last_exported_path: None,
        }
    }
}

pub fn push_wrapped_status_kv(
    out: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    status_area_width: u16,
) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    // Account for borders (2 chars on each side)
    let usable_width = status_area_width.saturating_sub(4).max(1);
    let label_text = format!("{label}:");
    let label_width = label_text.chars().count() as u16;

    let value_chars: Vec<char> = value.chars().collect();
    let mut remaining = value_chars.as_slice();
    let mut first = true;

    while !remaining.is_empty() {
        let line_width = if first {
            usable_width.saturating_sub(label_width + 1).max(1)
        } else {
            usable_width.saturating_sub(2).max(1)
        };

        let chars_to_take = remaining.len().min(line_width as usize);
        let (line_chars, rest) = remaining.split_at(chars_to_take);
        let line_text: String = line_chars.iter().collect();

        if first {
            out.push(Line::from(vec![
                Span::styled(label_text.clone(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(line_text),
            ]));
            first = false;
        } else {
            out.push(Line::from(vec![Span::raw("  "), Span::raw(line_text)]));
        }

        remaining = rest;
    }
}

impl UiState {
    /// Input editing is locked while a submission is outstanding.
    pub fn input_enabled(&self) -> bool {
        self.session.view().submit_enabled
    }

    pub fn push_input(&mut self, c: char) {
        if self.input_enabled() && !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if self.input_enabled() {
            self.input.pop();
        }
    }

    pub fn clear_input(&mut self) {
        if self.input_enabled() {
            self.input.clear();
        }
    }

    pub fn scroll_results(&mut self, delta: i32) {
        let next = (self.results_scroll as i32 + delta).max(0);
        self.results_scroll = next.min(u16::MAX as i32) as u16;
    }
}
