//! ratatui-based UI.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context as _;
use bookconnect_application::{Browser, DialogKind, OptionKind, SearchField};
use bookconnect_core::{Rgb, ThemeValue};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod screen;

pub use screen::Screen;

const EMPTY_MESSAGE: &str = "No results found. Your filters might be too narrow.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

pub struct Ui {
    browser: Browser,
    screen: Screen,
    selected: usize,
}

impl Ui {
    pub fn new(mut browser: Browser) -> Self {
        let mut screen = Screen::default();
        browser.start(&mut screen);
        Self {
            browser,
            screen,
            selected: 0,
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(())), Ok(())) => Ok(()),
            (Ok(Ok(())), Err(err)) => Err(err),
            (Ok(Err(err)), _) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    needs_redraw = true;
                    if self.handle_key(key) == KeyOutcome::Quit {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if self.browser.is_dialog_open(DialogKind::Description) {
            self.handle_description_key(key)
        } else if self.browser.is_dialog_open(DialogKind::Settings) {
            self.handle_settings_key(key)
        } else if self.browser.is_dialog_open(DialogKind::Search) {
            self.handle_search_key(key)
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.screen.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.screen.rows.len().saturating_sub(1),
            KeyCode::Enter => self.select_current(),
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                self.browser.show_more(&mut self.screen);
            }
            KeyCode::Char('/') => {
                self.browser.open_search(&mut self.screen);
            }
            KeyCode::Char('s') => {
                self.browser.open_settings(&mut self.screen);
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn select_current(&mut self) {
        let Some(id) = self.screen.row_id(self.selected).cloned() else {
            return;
        };
        self.browser.select_book(id.as_str(), &mut self.screen);
    }

    fn handle_description_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Enter => self.select_current(),
            KeyCode::Esc | KeyCode::Char('q') => {
                self.browser.close_description(&mut self.screen);
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char('u') = key.code
        {
            if let Some(form) = self.browser.edit_search() {
                form.query.title_text.clear();
            }
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Esc => {
                self.browser.cancel_search(&mut self.screen);
            }
            KeyCode::Enter => {
                let outcome = self.browser.submit_search_form(&mut self.screen);
                self.selected = 0;
                debug!(
                    matched = outcome.matched,
                    empty = outcome.empty,
                    "search submitted"
                );
            }
            KeyCode::Tab => {
                if let Some(form) = self.browser.edit_search() {
                    form.focus = form.focus.next();
                }
            }
            KeyCode::BackTab => {
                if let Some(form) = self.browser.edit_search() {
                    form.focus = form.focus.prev();
                }
            }
            KeyCode::Left => self.browser.cycle_search_selector(false),
            KeyCode::Right => self.browser.cycle_search_selector(true),
            KeyCode::Backspace => {
                if let Some(form) = self.browser.edit_search()
                    && form.focus == SearchField::Title
                {
                    form.pop_char();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(form) = self.browser.edit_search()
                    && form.focus == SearchField::Title
                    && !ch.is_control()
                {
                    form.push_char(ch);
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => {
                self.browser.cancel_settings(&mut self.screen);
            }
            KeyCode::Enter => {
                self.browser.submit_settings_form(&mut self.screen);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                if let Some(form) = self.browser.edit_settings() {
                    form.toggle();
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn base_style(&self) -> Style {
        Style::default()
            .fg(rgb(self.screen.colors.dark))
            .bg(rgb(self.screen.colors.light))
    }

    fn accent_color(&self) -> Color {
        match self.browser.theme() {
            ThemeValue::Day => Color::Blue,
            ThemeValue::Night => Color::Yellow,
        }
    }

    fn draw(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.base_style()), area);

        if !self.screen.rows.is_empty() {
            self.selected = self.selected.min(self.screen.rows.len() - 1);
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(self.header_lines()))
            .alignment(Alignment::Center)
            .style(self.base_style())
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, layout[0]);

        self.draw_library(frame, layout[1]);

        let footer = Paragraph::new(Text::from(self.footer_lines()))
            .alignment(Alignment::Center)
            .style(self.base_style())
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if self.screen.is_dialog_open(DialogKind::Search) {
            self.draw_search_panel(area, frame);
        }

        if self.screen.is_dialog_open(DialogKind::Settings) {
            self.draw_settings_panel(area, frame);
        }

        if self.screen.is_dialog_open(DialogKind::Description) {
            self.draw_description_panel(area, frame);
        }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let matched = self.browser.paginator().matches().len();
        let total = self.browser.catalog().len();
        let mut spans = vec![
            Span::styled("Book Connect", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" - {} shown", self.screen.rows.len())),
        ];
        if matched != total {
            spans.push(Span::raw(format!(" of {matched} matches ({total} books)")));
        } else {
            spans.push(Span::raw(format!(" of {total} books")));
        }
        vec![Line::from(spans)]
    }

    fn footer_lines(&self) -> Vec<Line<'static>> {
        let key = |label: &'static str| {
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
        };

        if self.screen.is_dialog_open(DialogKind::Description) {
            return vec![Line::from(vec![
                key("Esc"),
                Span::raw(" close  "),
                key("Enter"),
                Span::raw(" toggle"),
            ])];
        }

        if self.screen.is_dialog_open(DialogKind::Settings) {
            return vec![Line::from(vec![
                key("←/→"),
                Span::raw(" choose  "),
                key("Enter"),
                Span::raw(" save  "),
                key("Esc"),
                Span::raw(" cancel"),
            ])];
        }

        if self.screen.is_dialog_open(DialogKind::Search) {
            return vec![Line::from(vec![
                key("Tab"),
                Span::raw(" field  "),
                key("←/→"),
                Span::raw(" option  "),
                key("Ctrl+u"),
                Span::raw(" clear title  "),
                key("Enter"),
                Span::raw(" search  "),
                key("Esc"),
                Span::raw(" cancel"),
            ])];
        }

        let more_style = if self.screen.remaining > 0 {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        vec![
            Line::from(vec![
                Span::styled("Show more", more_style),
                Span::raw(format!(" ({})", self.screen.remaining)),
            ]),
            Line::from(vec![
                key("Esc"),
                Span::raw(" quit  "),
                key("↑/↓"),
                Span::raw(" move  "),
                key("Enter"),
                Span::raw(" details  "),
                key("m"),
                Span::raw(" more  "),
                key("/"),
                Span::raw(" search  "),
                key("s"),
                Span::raw(" settings"),
            ]),
        ]
    }

    fn draw_library(&self, frame: &mut ratatui::Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Books")
            .style(self.base_style());

        if self.screen.empty_message || self.screen.rows.is_empty() {
            let lines = vec![
                Line::raw(EMPTY_MESSAGE),
                Line::raw(""),
                Line::raw("Press / to search again."),
            ];
            let paragraph = Paragraph::new(Text::from(lines))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let max_width = area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = self
            .screen
            .rows
            .iter()
            .map(|row| {
                let label = format!("{} by {}", row.title, row.author);
                ListItem::new(Line::raw(truncate_to_width(&label, max_width.max(8))))
            })
            .collect();

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_description_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let Some(details) = self.screen.details.as_ref() else {
            return;
        };
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(Span::styled(
                details.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                details.subtitle.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::raw(""),
            Line::raw(details.description.clone()),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Cover: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    details.image_url.clone(),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]),
        ];

        let paragraph = Paragraph::new(Text::from(lines))
            .style(self.base_style())
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_search_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let form = self.browser.search_form();
        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let focus_style = Style::default()
            .fg(self.accent_color())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let field = |name: &'static str, value: String, focused: bool| {
            Line::from(vec![
                Span::styled(name, if focused { focus_style } else { label_style }),
                Span::raw(value),
            ])
        };

        let title_value = if form.focus == SearchField::Title {
            format!("{}▏", form.query.title_text)
        } else {
            form.query.title_text.clone()
        };
        let lines = vec![
            field("Title:  ", title_value, form.focus == SearchField::Title),
            field(
                "Author: ",
                self.screen
                    .option_label(OptionKind::Author, form.query.author.as_str())
                    .to_string(),
                form.focus == SearchField::Author,
            ),
            field(
                "Genre:  ",
                self.screen
                    .option_label(OptionKind::Genre, form.query.genre.as_str())
                    .to_string(),
                form.focus == SearchField::Genre,
            ),
        ];

        let paragraph = Paragraph::new(Text::from(lines))
            .style(self.base_style())
            .block(Block::default().borders(Borders::ALL).title(Span::styled(
                "Search",
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_settings_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(45, 25, area);
        frame.render_widget(Clear, popup_area);

        let selection = self.browser.settings_form().selection;
        let lines = vec![Line::from(vec![
            Span::styled("Theme: ", Style::default().add_modifier(Modifier::BOLD)),
            option_chip("day", selection == ThemeValue::Day, self.accent_color()),
            Span::raw(" "),
            option_chip("night", selection == ThemeValue::Night, self.accent_color()),
        ])];

        let paragraph = Paragraph::new(Text::from(lines))
            .style(self.base_style())
            .block(Block::default().borders(Borders::ALL).title(Span::styled(
                "Settings",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        frame.render_widget(paragraph, popup_area);
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
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

fn rgb(value: Rgb) -> Color {
    Color::Rgb(value.0, value.1, value.2)
}

fn option_chip(label: &str, selected: bool, accent: Color) -> Span<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Span::styled(format!(" {label} "), style)
}

/// Cuts `text` to at most `max_width` display columns, marking the cut with `…`.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
