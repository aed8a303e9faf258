use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tracing::{debug, info};

use crate::config::config::Config;
use crate::data::data_provider::DataProvider;
use crate::logging::get_log_buffer;
use crate::state::controller::{ControllerOptions, NavigationController};
use crate::tui_renderer;
use crate::ui::actions::{Action, ActionContext, ActionResult};
use crate::ui::key_mapper::KeyMapper;

/// Log lines kept in the debug overlay
const DEBUG_LOG_LINES: usize = 200;

/// Interactive browser over a data provider
pub struct TuiApp {
    controller: NavigationController,
    key_mapper: KeyMapper,
    config: Config,
    show_debug: bool,
}

impl TuiApp {
    pub fn new(provider: Box<dyn DataProvider>, config: Config) -> Self {
        let controller = NavigationController::new(provider, ControllerOptions::from(&config));
        Self {
            controller,
            key_mapper: KeyMapper::new(),
            config,
            show_debug: false,
        }
    }

    /// Draw, then block on the next event, until an action asks to exit
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size()?;
        self.controller.handle(Action::Resize {
            width: size.width,
            height: size.height,
        });

        loop {
            self.draw(terminal)?;

            let event = event::read()?;
            if self.handle_event(&event) == ActionResult::Exit {
                info!(target: "navigation", "Exiting");
                return Ok(());
            }
        }
    }

    /// Map and fully process one terminal event
    pub fn handle_event(&mut self, event: &Event) -> ActionResult {
        let view = self.controller.view();
        let context = ActionContext {
            focus: view.focus,
            editing_search: view.is_editing_search(),
        };

        let Some(action) = self.key_mapper.map_event(event, &context) else {
            return ActionResult::NotHandled;
        };
        debug!(target: "input", "{:?} -> {}", event, action.name());

        if action == Action::ToggleDebug {
            self.show_debug = !self.show_debug;
            return ActionResult::Handled;
        }
        self.controller.handle(action)
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = self.controller.view();
        let logs = if self.show_debug {
            get_log_buffer().map(|buffer| buffer.get_recent(DEBUG_LOG_LINES))
        } else {
            None
        };
        terminal.draw(|f| tui_renderer::render(f, &view, &self.config.display, logs.as_deref()))?;
        Ok(())
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn is_debug_visible(&self) -> bool {
        self.show_debug
    }
}

/// Run the browser in the terminal, restoring it even when the loop fails
pub fn run_tui_app(provider: Box<dyn DataProvider>, config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(provider, config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
