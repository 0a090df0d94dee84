use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    DefaultTerminal, Frame,
};

const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C);
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0);
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68);
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65);

const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const CURSOR_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const CHECKED_STYLE: Style = Style::new().fg(BRAND_GREEN);
const FOOTER_STYLE: Style = Style::new().fg(BRAND_MUTED);

/// Checklist prompt: pick a subset of items before the comparison runs.
///
/// Stands in for the host dialogs the workflow used for category and
/// analysis-item selection. `run` resolves to `None` when the user
/// cancels.
pub struct SelectPrompt {
    title: String,
    items: Vec<String>,
    checked: Vec<bool>,
    cursor: usize,
    scroll_offset: usize,
    confirmed: bool,
    should_quit: bool,
}

impl SelectPrompt {
    #[must_use]
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        let checked = vec![false; items.len()];
        Self {
            title: title.into(),
            items,
            checked,
            cursor: 0,
            scroll_offset: 0,
            confirmed: false,
            should_quit: false,
        }
    }

    /// Starts with every item ticked.
    #[must_use]
    pub fn check_all(mut self) -> Self {
        self.checked.fill(true);
        self
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<Option<Vec<String>>> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }

        if !self.confirmed {
            return Ok(None);
        }
        let selected = self
            .items
            .into_iter()
            .zip(self.checked)
            .filter_map(|(item, checked)| checked.then_some(item))
            .collect();
        Ok(Some(selected))
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            self.handle_key(key.code);
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                self.confirmed = true;
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('a') => self.checked.fill(true),
            KeyCode::Char('n') => self.checked.fill(false),
            _ => {}
        }
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.cursor < self.scroll_offset {
                self.scroll_offset = self.cursor;
            }
        }
    }

    fn move_down(&mut self) {
        if self.cursor < self.items.len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    fn toggle_current(&mut self) {
        if let Some(slot) = self.checked.get_mut(self.cursor) {
            *slot = !*slot;
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Checklist
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let ticked = self.checked.iter().filter(|&&c| c).count();
        let title = format!(" {} | {}/{} selected ", self.title, ticked, self.items.len());
        let header = Paragraph::new(title)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        if self.cursor >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor + 1 - visible;
        }

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible.max(1))
            .map(|(i, item)| {
                let marker = if self.checked[i] { "[x] " } else { "[ ] " };
                let style = if i == self.cursor {
                    CURSOR_STYLE
                } else if self.checked[i] {
                    CHECKED_STYLE
                } else {
                    Style::default()
                };
                ListItem::new(format!("{marker}{item}")).style(style)
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let footer =
            Paragraph::new(" ↑↓ Move | Space Toggle | a All | n None | Enter OK | q Cancel ")
                .style(FOOTER_STYLE)
                .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }
}

/// Runs a checklist prompt on its own terminal session.
pub fn multi_select(
    title: &str,
    items: Vec<String>,
    preselect_all: bool,
) -> Result<Option<Vec<String>>> {
    let mut prompt = SelectPrompt::new(title, items);
    if preselect_all {
        prompt = prompt.check_all();
    }
    let terminal = ratatui::init();
    let result = prompt.run(terminal);
    ratatui::restore();
    result
}
