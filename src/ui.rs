use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tally_ledger::{
    format_amount, EntryKind, KeyValueStore, LedgerEntry, LedgerStore, NotificationKind,
    NotificationQueue, TallyStore,
};

/// How long to wait for a key before redrawing (lets notifications expire)
const TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Tally,
    Ledger,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Tally => Page::Ledger,
            Page::Ledger => Page::Tally,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages: previous and next coincide
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Tally => "Sales Tally",
            Page::Ledger => "Income & Expenses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
}

/// Input form for a new ledger entry
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub kind: EntryKind,
    pub description: String,
    pub amount: String,
    pub field: FormField,
}

impl EntryForm {
    fn new(kind: EntryKind) -> Self {
        EntryForm {
            kind,
            description: String::new(),
            amount: String::new(),
            field: FormField::Description,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Description => &mut self.description,
            FormField::Amount => &mut self.amount,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Description => FormField::Amount,
            FormField::Amount => FormField::Description,
        };
    }
}

pub struct App<S: KeyValueStore> {
    pub tally: TallyStore<S>,
    pub ledger: LedgerStore<S>,
    pub notifications: NotificationQueue,
    pub current_page: Page,
    pub tally_state: TableState,
    pub focus: EntryKind,
    pub income_state: TableState,
    pub expense_state: TableState,
    pub form: Option<EntryForm>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tally: TallyStore<S>, ledger: LedgerStore<S>, notifications: NotificationQueue) -> Self {
        let mut tally_state = TableState::default();
        if !tally.is_empty() {
            tally_state.select(Some(0));
        }

        let mut app = Self {
            tally,
            ledger,
            notifications,
            current_page: Page::Tally,
            tally_state,
            focus: EntryKind::Income,
            income_state: TableState::default(),
            expense_state: TableState::default(),
            form: None,
        };
        app.clamp_selection(EntryKind::Income);
        app.clamp_selection(EntryKind::Expense);
        app
    }

    /// Apply one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if self.form.is_some() {
            self.handle_form_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Tab => self.current_page = self.current_page.next(),
            KeyCode::BackTab => self.current_page = self.current_page.previous(),
            _ => match self.current_page {
                Page::Tally => self.handle_tally_key(key),
                Page::Ledger => self.handle_ledger_key(key),
            },
        }

        false
    }

    fn handle_tally_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
            KeyCode::Char('+') | KeyCode::Right | KeyCode::Enter => {
                if let Some(id) = self.selected_item_id() {
                    self.tally.increment(&id, &mut self.notifications);
                }
            }
            KeyCode::Char('-') | KeyCode::Left => {
                if let Some(id) = self.selected_item_id() {
                    self.tally.decrement(&id, &mut self.notifications);
                }
            }
            _ => {}
        }
    }

    fn handle_ledger_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.focus = self.focus.other();
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_entry_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_entry_selection(-1),
            KeyCode::Char('i') => self.form = Some(EntryForm::new(EntryKind::Income)),
            KeyCode::Char('e') => self.form = Some(EntryForm::new(EntryKind::Expense)),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_entry(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.form = None,
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => {
                form.active_mut().pop();
            }
            KeyCode::Char(c) => form.active_mut().push(c),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    /// Try to add the form's entry; the form stays open when validation fails
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };

        match self
            .ledger
            .add(form.kind, &form.description, &form.amount, &mut self.notifications)
        {
            Ok(_) => {
                self.focus = form.kind;
                let last = self.ledger.entries(form.kind).len().saturating_sub(1);
                self.entry_state_mut(form.kind).select(Some(last));
            }
            Err(_) => self.form = Some(form),
        }
    }

    pub fn remove_selected_entry(&mut self) {
        let kind = self.focus;
        let Some(id) = self.selected_entry().map(|entry| entry.id.clone()) else {
            return;
        };

        self.ledger.remove(kind, &id, &mut self.notifications);
        self.clamp_selection(kind);
    }

    pub fn selected_item_id(&self) -> Option<String> {
        self.tally_state
            .selected()
            .and_then(|i| self.tally.items().nth(i))
            .map(|item| item.id.clone())
    }

    pub fn selected_entry(&self) -> Option<&LedgerEntry> {
        let state = match self.focus {
            EntryKind::Income => &self.income_state,
            EntryKind::Expense => &self.expense_state,
        };
        state
            .selected()
            .and_then(|i| self.ledger.entries(self.focus).get(i))
    }

    fn entry_state_mut(&mut self, kind: EntryKind) -> &mut TableState {
        match kind {
            EntryKind::Income => &mut self.income_state,
            EntryKind::Expense => &mut self.expense_state,
        }
    }

    fn clamp_selection(&mut self, kind: EntryKind) {
        let len = self.ledger.entries(kind).len();
        let state = self.entry_state_mut(kind);
        if len == 0 {
            state.select(None);
        } else {
            let i = state.selected().unwrap_or(0).min(len - 1);
            state.select(Some(i));
        }
    }

    fn move_entry_selection(&mut self, delta: i32) {
        let kind = self.focus;
        let len = self.ledger.entries(kind).len();
        if len == 0 {
            return;
        }
        let state = self.entry_state_mut(kind);
        let i = match state.selected() {
            Some(i) if delta > 0 => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    fn next_item(&mut self) {
        let len = self.tally.len();
        if len == 0 {
            return;
        }
        let i = match self.tally_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.tally_state.select(Some(i));
    }

    fn previous_item(&mut self) {
        let len = self.tally.len();
        if len == 0 {
            return;
        }
        let i = match self.tally_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.tally_state.select(Some(i));
    }
}

pub fn run_ui<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal UI stopped");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        app.notifications.prune();
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Tally => render_tally(f, chunks[1], app),
        Page::Ledger => render_ledger(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let pages = [Page::Tally, Page::Ledger];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Sold: {}", format_amount(app.tally.total_revenue())),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  |  "));
    let net = app.ledger.net_balance();
    tab_spans.push(Span::styled(
        format!("Net: {}", format_amount(net)),
        Style::default().fg(balance_color(net)),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_tally<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let totals = Paragraph::new(Line::from(vec![
        Span::styled("  Total sold: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            format_amount(app.tally.total_revenue()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Products sold: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(app.tally.total_items_sold().to_string()),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(totals, chunks[0]);

    let header_cells = ["Product", "Price", "Sold", "Subtotal"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.tally.items().map(|item| {
        let color = item_color(&item.color);
        Row::new(vec![
            Cell::from(item.name.clone()).style(Style::default().fg(color)),
            Cell::from(format_amount(item.price)),
            Cell::from(item.count.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(format_amount(item.subtotal())).style(Style::default().fg(Color::Green)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Products "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.tally_state);
}

fn render_ledger<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let form_height = if app.form.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Min(0),
        ])
        .split(area);

    render_ledger_totals(f, chunks[0], app);

    if let Some(form) = &app.form {
        render_form(f, chunks[1], form);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let income_table = entry_table(
        app.ledger.income(),
        " Income ",
        Color::Green,
        app.focus == EntryKind::Income,
    );
    f.render_stateful_widget(income_table, columns[0], &mut app.income_state);

    let expense_table = entry_table(
        app.ledger.expenses(),
        " Expenses ",
        Color::Red,
        app.focus == EntryKind::Expense,
    );
    f.render_stateful_widget(expense_table, columns[1], &mut app.expense_state);
}

fn render_ledger_totals<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let net = app.ledger.net_balance();
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let totals = Paragraph::new(Line::from(vec![
        Span::styled("  Income: ", label),
        Span::styled(format_amount(app.ledger.total_income()), Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("Expenses: ", label),
        Span::styled(format_amount(app.ledger.total_expenses()), Style::default().fg(Color::Red)),
        Span::raw("    "),
        Span::styled("Net profit: ", label),
        Span::styled(
            format_amount(net),
            Style::default().fg(balance_color(net)).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Summary "));

    f.render_widget(totals, area);
}

fn render_form(f: &mut Frame, area: Rect, form: &EntryForm) {
    let field_style = |field: FormField| {
        if form.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let cursor = |field: FormField| if form.field == field { "▏" } else { "" };

    let line = Line::from(vec![
        Span::styled("  Description: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{}{}", form.description, cursor(FormField::Description)),
            field_style(FormField::Description),
        ),
        Span::raw("    "),
        Span::styled("Amount: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{}{}", form.amount, cursor(FormField::Amount)),
            field_style(FormField::Amount),
        ),
    ]);

    let color = match form.kind {
        EntryKind::Income => Color::Green,
        EntryKind::Expense => Color::Red,
    };
    let title = format!(" New {} (Tab field, Enter save, Esc cancel) ", form.kind.as_str().to_lowercase());

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    f.render_widget(paragraph, area);
}

fn entry_table<'a>(entries: &'a [LedgerEntry], title: &'a str, color: Color, focused: bool) -> Table<'a> {
    let header_cells = ["Date", "Description", "Amount"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = entries.iter().map(|entry| {
        Row::new(vec![
            Cell::from(entry.display_date()),
            Cell::from(truncate(&entry.description, 28)),
            Cell::from(format_amount(entry.amount)).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let border = if focused { color } else { Color::White };

    Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    )
    .highlight_style(if focused {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    })
    .highlight_symbol(if focused { "→ " } else { "  " })
}

fn render_status_bar<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let status_spans = match app.notifications.current() {
        Some(notification) => {
            let color = match notification.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Error => Color::Red,
            };
            vec![
                Span::styled(
                    format!(" {} ", notification.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notification.message.clone()),
            ]
        }
        None => key_hints(app),
    };

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn key_hints<S: KeyValueStore>(app: &App<S>) -> Vec<Span<'static>> {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![];

    match app.current_page {
        Page::Tally => {
            spans.push(Span::styled(" +/→", key));
            spans.push(Span::raw(" Sell | "));
            spans.push(Span::styled("-/←", key));
            spans.push(Span::raw(" Unsell | "));
            spans.push(Span::styled("↑/↓", key));
            spans.push(Span::raw(" Nav | "));
        }
        Page::Ledger => {
            spans.push(Span::styled(" i", key));
            spans.push(Span::raw(" Income | "));
            spans.push(Span::styled("e", key));
            spans.push(Span::raw(" Expense | "));
            spans.push(Span::styled("d", key));
            spans.push(Span::raw(" Remove | "));
            spans.push(Span::styled("←/→", key));
            spans.push(Span::raw(" Column | "));
        }
    }

    spans.push(Span::styled("Tab", key));
    spans.push(Span::raw(" Page | "));
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));
    spans
}

fn balance_color(amount: f64) -> Color {
    if amount >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

/// Accepts bare names ("amber") and gradient classes ("from-amber-500 to-orange-600")
fn item_color(tag: &str) -> Color {
    [
        ("amber", Color::Yellow),
        ("pink", Color::Magenta),
        ("red", Color::Red),
        ("green", Color::Green),
    ]
    .into_iter()
    .find(|(name, _)| tag.contains(name))
    .map_or(Color::White, |(_, color)| color)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_ledger::MemoryStore;

    fn app() -> App<MemoryStore> {
        let store = MemoryStore::new();
        App::new(
            TallyStore::load(store.clone()),
            LedgerStore::load(store),
            NotificationQueue::default(),
        )
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_tab_switches_pages() {
        let mut app = app();
        assert_eq!(app.current_page, Page::Tally);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_page, Page::Ledger);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_page, Page::Tally);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(press(&mut app, KeyCode::Esc));
        assert!(!press(&mut app, KeyCode::Char('x')));
    }

    #[test]
    fn test_sell_and_unsell_selected_product() {
        let mut app = app();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('-'));

        assert_eq!(app.tally.item("producto2").unwrap().count, 1);
        assert_eq!(app.tally.total_revenue(), 12.0);
        assert_eq!(app.notifications.current().unwrap().title, "Product removed");
    }

    #[test]
    fn test_unsell_at_zero_shows_nothing() {
        let mut app = app();

        press(&mut app, KeyCode::Char('-'));

        assert!(app.notifications.is_empty());
        assert_eq!(app.tally.total_items_sold(), 0);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_item_id().as_deref(), Some("producto4"));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_item_id().as_deref(), Some("producto1"));
    }

    #[test]
    fn test_income_form_submits() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "Sale");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "100");
        press(&mut app, KeyCode::Enter);

        assert!(app.form.is_none());
        assert_eq!(app.ledger.total_income(), 100.0);
        assert_eq!(app.selected_entry().unwrap().description, "Sale");
    }

    #[test]
    fn test_form_keys_do_not_leak() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('e'));
        // 'q' is text while the form is open, not quit
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.form.as_ref().unwrap().description, "q");

        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert!(app.ledger.expenses().is_empty());
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "Rent");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.description, "Rent");
        assert_eq!(form.amount, "abc");
        assert!(app.ledger.expenses().is_empty());
        assert!(app.notifications.current().unwrap().is_error());
    }

    #[test]
    fn test_remove_selected_entry() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);

        for (desc, amount) in [("Rent", "40"), ("Flour", "12")] {
            press(&mut app, KeyCode::Char('e'));
            type_text(&mut app, desc);
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, amount);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.focus, EntryKind::Expense);

        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.ledger.expenses().len(), 1);
        assert_eq!(app.ledger.total_expenses(), 40.0);
        assert_eq!(app.selected_entry().unwrap().description, "Rent");

        press(&mut app, KeyCode::Char('d'));
        assert!(app.ledger.expenses().is_empty());
        assert!(app.selected_entry().is_none());

        // Nothing left to remove
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.ledger.net_balance(), 0.0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Pastel Chocolate Grande", 10), "Pastel ...");
    }

    #[test]
    fn test_item_color_reads_gradient_classes() {
        assert_eq!(item_color("amber"), Color::Yellow);
        assert_eq!(item_color("from-amber-500 to-orange-600"), Color::Yellow);
        assert_eq!(item_color("from-pink-500 to-rose-600"), Color::Magenta);
        assert_eq!(item_color("from-green-500 to-emerald-600"), Color::Green);
        assert_eq!(item_color(""), Color::White);
    }
}
