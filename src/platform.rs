//! Windows-specific hook that strips the native title bar and frame.
//!
//! Strategy: keep the window's native style (`decorations: true` gives resize
//! borders, snapping and the maximize animation), then subclass the window
//! procedure and answer the non-client size request ourselves so the whole window
//! becomes client area. See [`crate::chrome`] for the geometry.
//!
//! The subclass API needs Common Controls v6, which `build.rs` requests through the
//! application manifest.

use crate::chrome::ChromeError;
use crate::controls::WindowState;

#[cfg(target_os = "windows")]
mod win32 {
    use crate::chrome::{
        ChromeError, ChromeInterceptor, Placement, Point, Rect, Response, ShowState, WindowHost,
        WindowMessage,
    };
    use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
    use windows_sys::Win32::UI::HiDpi::GetSystemMetricsForDpi;
    use windows_sys::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
    use windows_sys::Win32::UI::WindowsAndMessaging::*;

    /// Identifies our subclass among any others installed on the window.
    const SUBCLASS_ID: usize = 0x4348_524D;

    impl From<RECT> for Rect {
        fn from(rect: RECT) -> Self {
            Rect::new(rect.left, rect.top, rect.right, rect.bottom)
        }
    }

    impl From<Rect> for RECT {
        fn from(rect: Rect) -> Self {
            RECT {
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
            }
        }
    }

    impl From<POINT> for Point {
        fn from(point: POINT) -> Self {
            Point {
                x: point.x,
                y: point.y,
            }
        }
    }

    pub fn query_placement(hwnd: HWND) -> Result<Placement, ChromeError> {
        let mut placement: WINDOWPLACEMENT = unsafe { std::mem::zeroed() };
        placement.length = std::mem::size_of::<WINDOWPLACEMENT>() as u32;

        if unsafe { GetWindowPlacement(hwnd, &mut placement) } == 0 {
            let code = unsafe { GetLastError() };
            return Err(ChromeError::Placement { code });
        }

        Ok(Placement {
            flags: placement.flags,
            show_state: ShowState::from_raw(placement.showCmd),
            min_position: placement.ptMinPosition.into(),
            max_position: placement.ptMaxPosition.into(),
            normal_position: placement.rcNormalPosition.into(),
        })
    }

    /// Caption height at 96 DPI. The process is per-monitor DPI aware, so plain
    /// `GetSystemMetrics` would already be scaled to the system DPI.
    pub fn unscaled_caption_height() -> f64 {
        unsafe { GetSystemMetricsForDpi(SM_CYCAPTION, USER_DEFAULT_SCREEN_DPI) as f64 }
    }

    /// The window as seen from inside one calc-size message.
    struct NativeHost {
        hwnd: HWND,
        wparam: WPARAM,
        lparam: LPARAM,
    }

    impl WindowHost for NativeHost {
        fn placement(&self) -> Result<Placement, ChromeError> {
            let placement = query_placement(self.hwnd)?;
            log::trace!(
                "placement {:?} flags={:#x} min={:?} max={:?} normal={:?}",
                placement.show_state,
                placement.flags,
                placement.min_position,
                placement.max_position,
                placement.normal_position
            );
            Ok(placement)
        }

        fn default_client_rect(&mut self, proposed: Rect) -> Rect {
            // lparam points at a RECT, or at NCCALCSIZE_PARAMS whose first member is
            // the RECT we care about. Either way it is the first thing at lparam.
            let rect = self.lparam as *mut RECT;
            unsafe {
                *rect = proposed.into();
                DefWindowProcW(self.hwnd, WM_NCCALCSIZE, self.wparam, self.lparam);
                Rect::from(*rect)
            }
        }

        fn caption_height(&self) -> f64 {
            unscaled_caption_height()
        }
    }

    unsafe extern "system" fn chrome_subclass_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
        subclass_id: usize,
        _ref_data: usize,
    ) -> LRESULT {
        if msg == WM_NCDESTROY {
            RemoveWindowSubclass(hwnd, Some(chrome_subclass_proc), subclass_id);
            log::debug!("chrome hook removed from {:p}", hwnd);
            return DefSubclassProc(hwnd, msg, wparam, lparam);
        }

        let message = WindowMessage::decode(msg, || {
            if lparam == 0 {
                None
            } else {
                Some(Rect::from(*(lparam as *const RECT)))
            }
        });

        let mut host = NativeHost {
            hwnd,
            wparam,
            lparam,
        };

        match ChromeInterceptor::new().dispatch(&mut host, message) {
            Ok(response) if !response.is_handled() => DefSubclassProc(hwnd, msg, wparam, lparam),
            Ok(Response::ClientArea(client)) => {
                *(lparam as *mut RECT) = client.into();
                0
            }
            Ok(_) => 0,
            Err(err) => {
                // Unwinding out of a window procedure is not allowed.
                log::error!("cannot lay out window chrome for {:p}: {}", hwnd, err);
                std::process::abort();
            }
        }
    }

    pub fn install(hwnd: HWND) -> Result<(), ChromeError> {
        unsafe {
            if SetWindowSubclass(hwnd, Some(chrome_subclass_proc), SUBCLASS_ID, 0) == 0 {
                return Err(ChromeError::Install { code: GetLastError() });
            }

            // Make the window manager ask for the non-client size again.
            SetWindowPos(
                hwnd,
                std::ptr::null_mut(),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_FRAMECHANGED,
            );
        }
        Ok(())
    }

    pub fn uninstall(hwnd: HWND) {
        // Fails harmlessly if the window is gone and the hook already removed itself.
        unsafe {
            RemoveWindowSubclass(hwnd, Some(chrome_subclass_proc), SUBCLASS_ID);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn placement_of_invalid_window_is_an_error() {
            let err = query_placement(std::ptr::null_mut()).unwrap_err();
            // ERROR_INVALID_WINDOW_HANDLE
            assert!(matches!(err, ChromeError::Placement { code: 1400 }));
        }

        #[test]
        fn caption_height_ignores_display_scale() {
            let host = NativeHost {
                hwnd: std::ptr::null_mut(),
                wparam: 0,
                lparam: 0,
            };
            let at_96_dpi = unsafe { GetSystemMetricsForDpi(SM_CYCAPTION, 96) } as f64;
            let at_144_dpi = unsafe { GetSystemMetricsForDpi(SM_CYCAPTION, 144) } as f64;

            assert_eq!(host.caption_height(), at_96_dpi);
            assert!(host.caption_height() > 0.0);
            assert!(at_144_dpi > at_96_dpi);
        }
    }
}

/// A chrome hook attached to one window. Dropping it detaches the hook.
#[derive(Debug)]
pub struct ChromeHook {
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    hwnd: isize,
}

impl ChromeHook {
    /// Current window state as recorded by the window manager, or `None` where the
    /// platform has no placement to query.
    #[cfg(target_os = "windows")]
    pub fn window_state(&self) -> Result<Option<WindowState>, ChromeError> {
        let placement = win32::query_placement(self.hwnd as _)?;
        Ok(Some(WindowState::from(&placement)))
    }

    #[cfg(not(target_os = "windows"))]
    pub fn window_state(&self) -> Result<Option<WindowState>, ChromeError> {
        Ok(None)
    }
}

impl Drop for ChromeHook {
    fn drop(&mut self) {
        #[cfg(target_os = "windows")]
        win32::uninstall(self.hwnd as _);
    }
}

/// Attaches the chrome hook to the window whose winit id is `window_id`. On
/// Windows the winit id is the `HWND`.
///
/// Must run on the thread that created the window.
#[cfg(target_os = "windows")]
pub fn install(window_id: u64) -> Result<ChromeHook, ChromeError> {
    let hwnd = window_id as isize;
    win32::install(hwnd as _)?;
    log::debug!("chrome hook installed on {:#x}", hwnd);
    Ok(ChromeHook { hwnd })
}

#[cfg(not(target_os = "windows"))]
pub fn install(window_id: u64) -> Result<ChromeHook, ChromeError> {
    // No-op on non-Windows platforms
    log::debug!("no chrome hook on this platform; window {window_id:#x} keeps its decorations");
    Ok(ChromeHook {
        hwnd: window_id as isize,
    })
}
