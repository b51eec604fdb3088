use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use docqa_core::{Msg, View};

/// What a key press asks the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Msg),
    /// Stat the typed path and hand the result to the core.
    ChooseFile,
    Quit,
}

/// The slice of UI state key mapping depends on.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub active: View,
    pub path_input: &'a str,
    pub has_pending: bool,
}

pub fn map_key(key: KeyEvent, ctx: KeyContext<'_>) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global bindings, valid in every view.
    match key.code {
        KeyCode::Char('c') if ctrl => return Some(KeyAction::Quit),
        KeyCode::Char('r') if ctrl => return Some(dispatch(Msg::RefreshRequested)),
        KeyCode::Tab => return Some(dispatch(Msg::ViewSelected(ctx.active.next()))),
        KeyCode::BackTab => return Some(dispatch(Msg::ViewSelected(ctx.active.previous()))),
        KeyCode::F(n @ 1..=4) => {
            return View::from_index(usize::from(n - 1)).map(|v| dispatch(Msg::ViewSelected(v)));
        }
        _ => {}
    }

    if ctx.active == View::Upload {
        return map_upload_key(key, ctx, ctrl);
    }

    match key.code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('r') => Some(dispatch(Msg::RefreshRequested)),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            View::from_index(index).map(|v| dispatch(Msg::ViewSelected(v)))
        }
        KeyCode::Esc => Some(dispatch(Msg::NoticeDismissed)),
        _ => None,
    }
}

fn map_upload_key(key: KeyEvent, ctx: KeyContext<'_>, ctrl: bool) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('u') if ctrl => Some(dispatch(Msg::UploadClicked)),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => {
            let mut text = ctx.path_input.to_string();
            text.push(c);
            Some(dispatch(Msg::PathInputChanged(text)))
        }
        KeyCode::Backspace => {
            let mut text = ctx.path_input.to_string();
            text.pop()?;
            Some(dispatch(Msg::PathInputChanged(text)))
        }
        KeyCode::Enter if !ctx.path_input.trim().is_empty() => Some(KeyAction::ChooseFile),
        KeyCode::Enter if ctx.has_pending => Some(dispatch(Msg::UploadClicked)),
        KeyCode::Esc if !ctx.path_input.is_empty() => {
            Some(dispatch(Msg::PathInputChanged(String::new())))
        }
        KeyCode::Esc if ctx.has_pending => Some(dispatch(Msg::PendingCleared)),
        KeyCode::Esc => Some(dispatch(Msg::NoticeDismissed)),
        _ => None,
    }
}

fn dispatch(msg: Msg) -> KeyAction {
    KeyAction::Dispatch(msg)
}
