//! Raw-mode terminal handling.
//!
//! [`TerminalSession`] puts the terminal into raw mode on the alternate screen
//! and puts it back when it is left, dropped, or the program panics.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

pub struct TerminalSession {
    terminal: AppTerminal,
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;

        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            active: true,
        })
    }

    pub fn draw<R: FnOnce(&mut Frame)>(&mut self, render: R) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Restores the terminal. Errors are reported here; dropping only tries.
    pub fn leave(mut self) -> io::Result<()> {
        self.active = false;
        restore()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = restore();
        }
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
