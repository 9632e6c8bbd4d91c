//! Canonical input events.
//!
//! Terminal backends convert their native events into these types so that
//! models never depend on crossterm directly.

use bitflags::bitflags;
use crossterm::event as ct;
use swatch_render::HitId;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    F(u8),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True for an unmodified press (or repeat) of `ch`.
    #[must_use]
    pub fn is_char(&self, ch: char) -> bool {
        self.kind != KeyEventKind::Release
            && self.code == KeyCode::Char(ch)
            && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
    }

    #[must_use]
    pub fn is_ctrl_c(&self) -> bool {
        matches!(self.code, KeyCode::Char('c' | 'C')) && self.modifiers.contains(Modifiers::CTRL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Moved,
    Other,
}

/// A mouse event, with the hit region under the pointer already resolved
/// against the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub hit: Option<HitId>,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            hit: None,
        }
    }

    #[must_use]
    pub fn is_left_click(&self) -> bool {
        self.kind == MouseEventKind::Down(MouseButton::Left)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    Focus(bool),
}

impl Event {
    /// Convert a crossterm event; returns `None` for events models never see.
    #[must_use]
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        match event {
            ct::Event::Key(key) => Some(Self::Key(KeyEvent {
                code: convert_code(key.code),
                modifiers: convert_modifiers(key.modifiers),
                kind: match key.kind {
                    ct::KeyEventKind::Press => KeyEventKind::Press,
                    ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    ct::KeyEventKind::Release => KeyEventKind::Release,
                },
            })),
            ct::Event::Mouse(mouse) => {
                let kind = match mouse.kind {
                    ct::MouseEventKind::Down(b) => MouseEventKind::Down(convert_button(b)),
                    ct::MouseEventKind::Up(b) => MouseEventKind::Up(convert_button(b)),
                    ct::MouseEventKind::Moved | ct::MouseEventKind::Drag(_) => {
                        MouseEventKind::Moved
                    }
                    _ => MouseEventKind::Other,
                };
                Some(Self::Mouse(MouseEvent::new(kind, mouse.column, mouse.row)))
            }
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            ct::Event::FocusGained => Some(Self::Focus(true)),
            ct::Event::FocusLost => Some(Self::Focus(false)),
            _ => None,
        }
    }
}

fn convert_code(code: ct::KeyCode) -> KeyCode {
    match code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::F(n) => KeyCode::F(n),
        _ => KeyCode::Other,
    }
}

fn convert_modifiers(mods: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if mods.contains(ct::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(ct::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(ct::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    out
}

fn convert_button(button: ct::MouseButton) -> MouseButton {
    match button {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}
