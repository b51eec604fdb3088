use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use docqa_core::{update, AppState, Msg};
use docqa_logging::{docqa_info, docqa_warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::picker::choose_file;
use super::ui;
use super::ui::keys::{KeyAction, KeyContext};

const TICK: Duration = Duration::from_millis(75);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let (app_config, config_error) = match config::load(&config_path) {
        Ok(loaded) => (loaded, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    logging::initialize(&app_config);
    if let Some(err) = config_error {
        docqa_warn!("{err}; using defaults");
    }
    docqa_info!("docqa starting, backend {}", app_config.backend_url);

    let runner = EffectRunner::new(app_config.backend_settings())
        .context("failed to start the backend engine")?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let _terminal_guard = TerminalGuard {
        restore: restore_terminal,
    };
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = App::new(runner).run(&mut terminal);

    docqa_info!("docqa exiting");
    result
}

/// Runs `restore` when dropped, so the terminal is given back on every exit
/// path, including errors during setup and panics in the event loop.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        docqa_warn!("Failed to leave raw mode: {err}");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        docqa_warn!("Failed to leave the alternate screen: {err}");
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
    quit: bool,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            quit: false,
        }
    }

    fn run(mut self, terminal: &mut Term) -> anyhow::Result<()> {
        self.dispatch(Msg::Started);

        while !self.quit {
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
                    Event::Resize(_, _) => self.draw(terminal)?,
                    _ => {}
                }
            } else {
                self.dispatch(Msg::Tick);
            }

            for msg in self.runner.poll() {
                self.dispatch(msg);
            }

            if self.state.consume_dirty() {
                self.draw(terminal)?;
            }
        }
        Ok(())
    }

    fn on_key(&mut self, key: crossterm::event::KeyEvent) {
        let ctx = KeyContext {
            active: self.state.active_view(),
            path_input: self.state.path_input(),
            has_pending: self.state.pending().is_some(),
        };
        let Some(action) = ui::keys::map_key(key, ctx) else {
            return;
        };
        match action {
            KeyAction::Dispatch(msg) => self.dispatch(msg),
            KeyAction::ChooseFile => {
                let msg = choose_file(self.state.path_input());
                self.dispatch(msg);
            }
            KeyAction::Quit => self.quit = true,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn draw(&self, terminal: &mut Term) -> anyhow::Result<()> {
        let view = self.state.view();
        terminal.draw(|frame| ui::render::render(frame, &view))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::TerminalGuard;

    #[test]
    fn terminal_is_restored_on_early_error() {
        let restored = Cell::new(0);
        let setup = |fail: bool| -> Result<(), &'static str> {
            let _guard = TerminalGuard {
                restore: || restored.set(restored.get() + 1),
            };
            if fail {
                return Err("alternate screen unavailable");
            }
            Ok(())
        };

        assert!(setup(true).is_err());
        assert_eq!(restored.get(), 1);
        assert!(setup(false).is_ok());
        assert_eq!(restored.get(), 2);
    }

    #[test]
    fn terminal_is_restored_when_the_loop_panics() {
        let restored = Cell::new(false);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _guard = TerminalGuard {
                restore: || restored.set(true),
            };
            panic!("draw failed");
        }));

        assert!(outcome.is_err());
        assert!(restored.get());
    }
}
