//! Maps terminal input onto controller actions.
//!
//! Two trigger paths reach [`UiAction::Submit`]: the pointer path (mouse click
//! on the button, or Enter/Space while the button is focused), which respects
//! the button's disabled state, and the keyboard shortcut (Ctrl/Super+Enter,
//! or Ctrl+J, in the input), which does not. Both are guarded by the
//! controller's in-flight flag.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::core::controller::Focus;

const PAGE_SCROLL: u16 = 10;
const WHEEL_SCROLL: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    Submit,
    DismissNotice,
    ToggleFocus,
    FocusInput,
    ScrollUp(u16),
    ScrollDown(u16),
    /// Forward the key to the prompt textarea.
    Edit(KeyEvent),
    Ignore,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyContext {
    pub focus: Focus,
    pub notice_open: bool,
    pub triggers_wired: bool,
    pub button_enabled: bool,
}

fn has_platform_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}

pub fn resolve_key(key: &KeyEvent, ctx: KeyContext) -> UiAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return UiAction::Quit;
    }

    if ctx.notice_open {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => UiAction::DismissNotice,
            _ => UiAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => return UiAction::ToggleFocus,
        KeyCode::PageUp => return UiAction::ScrollUp(PAGE_SCROLL),
        KeyCode::PageDown => return UiAction::ScrollDown(PAGE_SCROLL),
        _ => {}
    }

    match ctx.focus {
        Focus::Input => match key.code {
            // Legacy terminals report Ctrl+Enter as Ctrl+J.
            KeyCode::Enter | KeyCode::Char('j')
                if (key.code == KeyCode::Enter && has_platform_modifier(key.modifiers))
                    || (key.code == KeyCode::Char('j')
                        && key.modifiers.contains(KeyModifiers::CONTROL)) =>
            {
                if ctx.triggers_wired {
                    UiAction::Submit
                } else {
                    UiAction::Ignore
                }
            }
            KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => UiAction::ScrollUp(1),
            KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => {
                UiAction::ScrollDown(1)
            }
            KeyCode::Esc => UiAction::Ignore,
            _ => UiAction::Edit(*key),
        },
        Focus::Button => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if ctx.triggers_wired && ctx.button_enabled {
                    UiAction::Submit
                } else {
                    UiAction::Ignore
                }
            }
            KeyCode::Up => UiAction::ScrollUp(1),
            KeyCode::Down => UiAction::ScrollDown(1),
            KeyCode::Esc => UiAction::FocusInput,
            _ => UiAction::Ignore,
        },
    }
}

pub fn resolve_mouse(mouse: &MouseEvent, button: Rect, input: Rect, ctx: KeyContext) -> UiAction {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp => UiAction::ScrollUp(WHEEL_SCROLL),
        MouseEventKind::ScrollDown => UiAction::ScrollDown(WHEEL_SCROLL),
        MouseEventKind::Down(MouseButton::Left) if ctx.notice_open => UiAction::DismissNotice,
        MouseEventKind::Down(MouseButton::Left) if button.contains(position) => {
            if ctx.triggers_wired && ctx.button_enabled {
                UiAction::Submit
            } else {
                UiAction::Ignore
            }
        }
        MouseEventKind::Down(MouseButton::Left) if input.contains(position) => UiAction::FocusInput,
        _ => UiAction::Ignore,
    }
}
