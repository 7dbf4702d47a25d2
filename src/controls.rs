//! Title bar affordances drawn inside the chrome-free window.
//!
//! `status` is what the title bar drag region returns from its event handler.
//! Maximize/restore and close arrive as button clicks, which the button widget has
//! already consumed by the time they get here.

use crate::chrome::{Placement, ShowState};
use iced::event;
use iced::mouse;

/// The two states the controls can move a window between. Minimizing is left to
/// the window manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
}

impl WindowState {
    pub fn toggled(self) -> Self {
        match self {
            WindowState::Normal => WindowState::Maximized,
            WindowState::Maximized => WindowState::Normal,
        }
    }

    pub fn is_maximized(self) -> bool {
        self == WindowState::Maximized
    }
}

impl From<&Placement> for WindowState {
    fn from(placement: &Placement) -> Self {
        match placement.show_state {
            ShowState::Maximized => WindowState::Maximized,
            _ => WindowState::Normal,
        }
    }
}

/// Input aimed at one of the title bar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TitleBar(mouse::Button),
    MaximizeRestore,
    Close,
}

/// A window manager operation the controls ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    /// Begin an interactive move driven by the button that is still held.
    Drag,
    SetState(WindowState),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlResponse {
    pub request: Option<WindowRequest>,
    pub status: event::Status,
}

impl ControlResponse {
    fn captured(request: WindowRequest) -> Self {
        Self {
            request: Some(request),
            status: event::Status::Captured,
        }
    }

    fn ignored() -> Self {
        Self {
            request: None,
            status: event::Status::Ignored,
        }
    }
}

pub fn respond(control: Control, state: WindowState) -> ControlResponse {
    match control {
        Control::TitleBar(mouse::Button::Left) => ControlResponse::captured(WindowRequest::Drag),
        Control::TitleBar(_) => ControlResponse::ignored(),
        Control::MaximizeRestore => ControlResponse::captured(WindowRequest::SetState(state.toggled())),
        Control::Close => ControlResponse::captured(WindowRequest::Close),
    }
}
