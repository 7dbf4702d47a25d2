//! Non-client area interception.
//!
//! The window keeps its native style bits (so snapping, the maximize animation and
//! the system menu keep working) but the non-client area is reclassified as client
//! area. The window manager asks for the client rectangle through the calc-size
//! message and we answer with the whole window rectangle.
//!
//! Known limitations:
//! - The maximized compensation uses the caption metric as if the display were at
//!   100% scale. At other scale factors the offset is off by the scale difference.
//! - An auto-hidden task bar is not special-cased, so a maximized window covers the
//!   one-pixel strip the task bar uses to reveal itself.

// Only the Windows hook drives the interceptor outside of tests.
#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use thiserror::Error;

/// Calc-size request. The payload is the proposed window rectangle.
pub const WM_NCCALCSIZE: u32 = 0x0083;
/// Undocumented: posted by the window manager to repaint the native caption.
pub const WM_NCUAHDRAWCAPTION: u32 = 0x00AE;
/// Undocumented: posted by the window manager to repaint the native frame.
pub const WM_NCUAHDRAWFRAME: u32 = 0x00AF;

#[derive(Debug, Error)]
pub enum ChromeError {
    #[error("failed to query window placement (os error {code})")]
    Placement { code: u32 },

    #[error("failed to install the window procedure hook (os error {code})")]
    Install { code: u32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Show command recorded in a window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowState {
    Hidden,
    Normal,
    Minimized,
    Maximized,
    Other(u32),
}

impl ShowState {
    pub fn from_raw(show_cmd: u32) -> Self {
        match show_cmd {
            0 => ShowState::Hidden,
            1 => ShowState::Normal,
            2 => ShowState::Minimized,
            3 => ShowState::Maximized,
            other => ShowState::Other(other),
        }
    }
}

/// Snapshot of a window's placement. Read-only input to the size adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub flags: u32,
    pub show_state: ShowState,
    pub min_position: Point,
    pub max_position: Point,
    pub normal_position: Rect,
}

impl Placement {
    pub fn is_maximized(&self) -> bool {
        self.show_state == ShowState::Maximized
    }
}

/// A window message after decoding its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    CalcSize { proposed: Rect },
    DrawCaption,
    DrawFrame,
    Other(u32),
}

impl WindowMessage {
    /// Decodes a raw message id. `proposed` is only read for calc-size requests;
    /// it returns `None` when the payload is unavailable, in which case the message
    /// is treated as one we do not handle.
    pub fn decode(id: u32, proposed: impl FnOnce() -> Option<Rect>) -> Self {
        match id {
            WM_NCCALCSIZE => match proposed() {
                Some(proposed) => WindowMessage::CalcSize { proposed },
                None => WindowMessage::Other(id),
            },
            WM_NCUAHDRAWCAPTION => WindowMessage::DrawCaption,
            WM_NCUAHDRAWFRAME => WindowMessage::DrawFrame,
            other => WindowMessage::Other(other),
        }
    }
}

/// What the hook hands back to the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Not ours; run default processing.
    Default,
    /// Handled with no output. Default processing must not run.
    Suppressed,
    /// Handled; write this rectangle back into the message payload.
    ClientArea(Rect),
}

impl Response {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Response::Default)
    }
}

/// What the interceptor needs from the window it is attached to.
pub trait WindowHost {
    fn placement(&self) -> Result<Placement, ChromeError>;

    /// Runs the window manager's default calc-size processing on `proposed` and
    /// returns the client rectangle it computed.
    fn default_client_rect(&mut self, proposed: Rect) -> Rect;

    /// Height of a native caption, in unscaled units.
    fn caption_height(&self) -> f64;
}

/// Pixels to pull the top edge of a maximized window up by.
pub fn caption_compensation(caption_height: f64) -> i32 {
    (caption_height + 1.0).ceil() as i32
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeInterceptor;

impl ChromeInterceptor {
    pub fn new() -> Self {
        Self
    }

    pub fn dispatch<H: WindowHost>(
        &self,
        host: &mut H,
        message: WindowMessage,
    ) -> Result<Response, ChromeError> {
        match message {
            WindowMessage::CalcSize { proposed } => {
                self.calc_size(host, proposed).map(Response::ClientArea)
            }
            // Default processing of these paints the native caption and frame.
            WindowMessage::DrawCaption | WindowMessage::DrawFrame => Ok(Response::Suppressed),
            WindowMessage::Other(_) => Ok(Response::Default),
        }
    }

    fn calc_size<H: WindowHost>(&self, host: &mut H, proposed: Rect) -> Result<Rect, ChromeError> {
        let placement = host.placement()?;

        if !placement.is_maximized() {
            // The whole window is client area; the app draws its own title bar.
            return Ok(proposed);
        }

        // Start from the default maximized rect so the task bar stays uncovered,
        // then hide the caption strip the window manager puts back on maximize.
        let mut client = host.default_client_rect(proposed);
        client.top -= caption_compensation(host.caption_height());
        Ok(client)
    }
}
