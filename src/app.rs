use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use tracing::{debug, trace};

use crate::command;
use crate::config::Config;
use crate::data::datatable::DataTable;
use crate::search_filter;
use crate::ui::query_line::{Mode, QueryLine};
use crate::ui::renderer;
use crate::ui::viewport::Viewport;

/// Rows/columns moved per single-line scroll key.
const SCROLL_SIZE: usize = 1;

/// The whole session: table, query line, viewport, config. Exclusively
/// owned by the single-threaded run loop; every key event is handled to
/// completion before the next draw.
pub struct App {
    pub table: DataTable,
    pub query: QueryLine,
    pub view: Viewport,
    pub config: Config,
    terminate: bool,
}

impl App {
    pub fn new(table: DataTable, config: Config) -> Self {
        Self {
            table,
            query: QueryLine::new(),
            view: Viewport::new(80, 24),
            config,
            terminate: false,
        }
    }

    pub fn should_terminate(&self) -> bool {
        self.terminate
    }

    /// Set up the terminal, run the event loop, and always restore the
    /// terminal afterwards, error or not.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(anyhow!("failed to set up terminal: {}", e));
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                let _ = disable_raw_mode();
                return Err(anyhow!("failed to create terminal: {}", e));
            }
        };

        let res = self.run_loop(&mut terminal);

        let _ = disable_raw_mode();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        res
    }

    /// Block on the next event, handle it fully, draw once, repeat. The
    /// blocking read is the only suspension point.
    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            if self.terminate {
                return Ok(());
            }

            let size = terminal.size()?;
            self.view.resize(size.width, size.height);

            let match_style = self.config.display.match_style();
            terminal.draw(|f| renderer::draw(f, &self.table, &self.query, match_style))?;

            match event::read().context("terminal event error")? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key);
                }
                Event::Resize(w, h) => self.view.resize(w, h),
                _ => {}
            }
        }
    }

    /// Route one key event. Ctrl-C and Ctrl-G work in every mode; other
    /// keys dispatch on the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        trace!(target: "input", code = ?key.code, mode = ?self.query.mode, "key");

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.terminate = true;
                return;
            }
            if key.code == KeyCode::Char('g') {
                self.query.clear_all();
                return;
            }
        }

        match self.query.mode {
            Mode::View => self.handle_view_key(key),
            _ => self.handle_input_key(key),
        }
    }

    /// Switch mode when the buffer is empty, the character is a reserved
    /// switch character and it differs from the current mode. The
    /// character is consumed by the switch.
    fn maybe_switch_mode(&mut self, c: char) -> bool {
        if !self.query.is_empty() {
            return false;
        }
        match Mode::from_switch_char(c) {
            Some(mode) if mode != self.query.mode => {
                debug!(target: "input", ?mode, "mode switch");
                self.query.mode = mode;
                true
            }
            _ => false,
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) {
        let page = (self.view.height / 2) as usize;
        let half = page / 2;

        match key.code {
            KeyCode::Char(c) => {
                if self.maybe_switch_mode(c) {
                    return;
                }
                match c {
                    'b' => self.view.move_up(&mut self.table, page),
                    'f' | 'F' | ' ' => self.view.move_down(&mut self.table, page),
                    'e' => self.view.move_down(&mut self.table, SCROLL_SIZE),
                    'y' => self.view.move_up(&mut self.table, SCROLL_SIZE),
                    'd' => self.view.move_down(&mut self.table, half),
                    'u' => self.view.move_up(&mut self.table, half),
                    'g' => self.view.jump_top(&mut self.table),
                    'G' => self.view.jump_bottom(&mut self.table),
                    _ => {}
                }
            }
            KeyCode::Right => self.view.move_right(&mut self.table, SCROLL_SIZE),
            KeyCode::Left => self.view.move_left(&mut self.table, SCROLL_SIZE),
            KeyCode::Down | KeyCode::Enter => self.view.move_down(&mut self.table, SCROLL_SIZE),
            KeyCode::Up => self.view.move_up(&mut self.table, SCROLL_SIZE),
            _ => {}
        }
    }

    /// Command, Search and Filter modes all edit the query line; Search
    /// and Filter additionally re-evaluate after every successful edit.
    fn handle_input_key(&mut self, key: KeyEvent) {
        // Enter runs the interpreter (observable in Command mode only) and
        // clears the buffer while keeping the mode. It returns before the
        // evaluation step so match/visibility state survives the clear.
        if key.code == KeyCode::Enter {
            if self.query.mode == Mode::Command {
                let input = self.query.text();
                if command::execute(&mut self.table, &input) {
                    self.terminate = true;
                }
            }
            self.query.clear_query();
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, ctrl) {
            (KeyCode::Char(c), false) => {
                if !self.maybe_switch_mode(c) {
                    self.query.insert_char(c);
                }
            }
            (KeyCode::Backspace, _) => self.query.backspace(),
            (KeyCode::Delete, false) | (KeyCode::Char('d'), true) => self.query.delete_forward(),
            (KeyCode::Char('k'), true) => self.query.truncate_from_cursor(),
            (KeyCode::Right, false) | (KeyCode::Char('f'), true) => self.query.move_right(),
            (KeyCode::Left, false) | (KeyCode::Char('b'), true) => self.query.move_left(),
            (KeyCode::Home, _) | (KeyCode::Char('a'), true) => self.query.move_to_start(),
            (KeyCode::End, _) | (KeyCode::Char('e'), true) => self.query.move_to_end(),
            // Unrecognized keys don't count as edits: no re-evaluation.
            _ => return,
        }

        match self.query.mode {
            Mode::Search => search_filter::run_search(&mut self.table, &self.query.text()),
            Mode::Filter => search_filter::run_filter(&mut self.table, &self.query.text()),
            _ => {}
        }
    }
}
