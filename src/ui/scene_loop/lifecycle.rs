use std::{error::Error, io};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    cursor::SetCursorStyle,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::Terminal;
use tracing::debug;

pub type SceneTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// A terminal in raw/alternate-screen mode plus what must be undone on exit.
pub struct TerminalSession {
    pub terminal: SceneTerminal,
    keyboard_enhanced: bool,
}

pub fn setup_terminal() -> Result<TerminalSession, Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture,
        SetCursorStyle::SteadyBar
    )?;

    // Without disambiguation most terminals report Ctrl+Enter as plain Enter.
    let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    debug!(keyboard_enhanced, "Terminal initialized");

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;

    Ok(TerminalSession {
        terminal,
        keyboard_enhanced,
    })
}

pub fn restore_terminal(session: &mut TerminalSession) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    let backend = session.terminal.backend_mut();
    if session.keyboard_enhanced {
        execute!(backend, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        backend,
        SetCursorStyle::DefaultUserShape,
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    session.terminal.show_cursor()?;
    Ok(())
}
