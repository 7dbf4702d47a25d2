use crate::config::{Config, ThemeConfig};
use crate::controls::{self, Control, WindowRequest, WindowState};
use crate::platform::{self, ChromeHook};
use crate::title_bar::TitleBar;
use iced::event::{self, Event};
use iced::widget::{button, column, container, row, svg, text, Space};
use iced::{theme, window, Application, Color, Command, Element, Length, Subscription, Theme};

// Window control icons, stroked with the theme's text color
const ICON_MAXIMIZE: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"12\" height=\"12\" viewBox=\"0 0 12 12\"><rect x=\"2\" y=\"2\" width=\"8\" height=\"8\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1\"/></svg>";
const ICON_RESTORE: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"12\" height=\"12\" viewBox=\"0 0 12 12\"><rect x=\"2\" y=\"4\" width=\"6\" height=\"6\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1\"/><polyline points=\"4,4 4,2 10,2 10,8 8,8\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1\"/></svg>";
const ICON_CLOSE: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"12\" height=\"12\" viewBox=\"0 0 12 12\"><line x1=\"2\" y1=\"2\" x2=\"10\" y2=\"10\" stroke=\"{color}\" stroke-width=\"1\"/><line x1=\"10\" y1=\"2\" x2=\"2\" y2=\"10\" stroke=\"{color}\" stroke-width=\"1\"/></svg>";

pub struct App {
    config: Config,
    palette: Palette,
    icons: Icons,
    hook: Option<ChromeHook>,
    window_state: WindowState,
}

#[derive(Clone, Debug)]
pub enum Message {
    /// The native window exists; carries its winit id.
    NativeHandle(u64),
    /// Decided by the title bar drag region.
    Request(WindowRequest),
    MaximizeRestore,
    Close,
    /// The window manager resized the window, possibly changing its state.
    WindowResized,
}

impl Application for App {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Config;

    fn new(config: Self::Flags) -> (Self, Command<Message>) {
        let palette = Palette::from_theme(&config.theme);
        let icons = Icons::new(&config.theme.text);

        (
            Self {
                config,
                palette,
                icons,
                hook: None,
                window_state: WindowState::Normal,
            },
            window::fetch_id(window::Id::MAIN, Message::NativeHandle),
        )
    }

    fn title(&self) -> String {
        self.config.title.clone()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::NativeHandle(id) => match platform::install(id) {
                Ok(hook) => {
                    self.hook = Some(hook);
                    return self.sync_window_state();
                }
                Err(e) => {
                    log::warn!("keeping native window chrome: {}", e);
                }
            },
            Message::Request(request) => {
                return self.apply(request);
            }
            Message::WindowResized => {
                return self.sync_window_state();
            }
            Message::MaximizeRestore => {
                return self.control(Control::MaximizeRestore);
            }
            Message::Close => {
                return self.control(Control::Close);
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        // Draggable title label fills everything left of the buttons
        let title_label = TitleBar::new(
            container(
                text(&self.config.title)
                    .size(12)
                    .style(theme::Text::Color(self.palette.text)),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y()
            .padding([0, 12]),
            self.window_state,
            Message::Request,
        );

        let maximize_icon = if self.window_state.is_maximized() {
            self.icons.restore.clone()
        } else {
            self.icons.maximize.clone()
        };

        let btn_maximize = button(svg(maximize_icon).width(12).height(12))
            .on_press(Message::MaximizeRestore)
            .height(Length::Fill)
            .padding([0, 17])
            .style(theme::Button::Custom(Box::new(ControlButtonStyle {
                hover: self.palette.button_hover,
            })));

        let btn_close = button(svg(self.icons.close.clone()).width(12).height(12))
            .on_press(Message::Close)
            .height(Length::Fill)
            .padding([0, 17])
            .style(theme::Button::Custom(Box::new(ControlButtonStyle {
                hover: self.palette.close_hover,
            })));

        let title_bar = container(
            row![title_label, btn_maximize, btn_close]
                .align_items(iced::Alignment::Center)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(self.config.title_bar_height)
        .style(theme::Container::Custom(Box::new(FillStyle {
            color: self.palette.title_bar,
        })));

        let body = container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::Custom(Box::new(FillStyle {
                color: self.palette.background,
            })));

        column![title_bar, body].into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(window_event)
    }
}

/// Snaps, Win+Up and taskbar restores all arrive as resizes.
fn window_event(event: Event, _status: event::Status) -> Option<Message> {
    match event {
        Event::Window(_, window::Event::Resized { .. }) => Some(Message::WindowResized),
        _ => None,
    }
}

impl App {
    /// Runs a title bar control against the current window state.
    /// The maximize and close buttons consume their own clicks; this only decides
    /// what the window manager is asked to do.
    fn control(&mut self, control: Control) -> Command<Message> {
        if let Err(e) = self.refresh_window_state() {
            log::error!("{}", e);
            return window::close(window::Id::MAIN);
        }

        match controls::respond(control, self.window_state).request {
            Some(request) => self.apply(request),
            None => Command::none(),
        }
    }

    fn apply(&mut self, request: WindowRequest) -> Command<Message> {
        log::trace!("window request {:?}", request);

        match request {
            WindowRequest::Drag => window::drag(window::Id::MAIN),
            WindowRequest::SetState(state) => {
                self.window_state = state;
                window::maximize(window::Id::MAIN, state.is_maximized())
            }
            WindowRequest::Close => window::close(window::Id::MAIN),
        }
    }

    fn sync_window_state(&mut self) -> Command<Message> {
        match self.refresh_window_state() {
            Ok(()) => Command::none(),
            Err(e) => {
                log::error!("{}", e);
                window::close(window::Id::MAIN)
            }
        }
    }

    /// The window manager owns the state; re-read it where it can be queried.
    /// Elsewhere the last requested state stands.
    fn refresh_window_state(&mut self) -> Result<(), crate::chrome::ChromeError> {
        if let Some(hook) = &self.hook {
            if let Some(state) = hook.window_state()? {
                self.window_state = state;
            }
        }
        Ok(())
    }
}

struct Icons {
    maximize: svg::Handle,
    restore: svg::Handle,
    close: svg::Handle,
}

impl Icons {
    fn new(stroke: &str) -> Self {
        let color = if parse_hex_color(stroke).is_some() {
            stroke
        } else {
            "#F0F0F0"
        };
        let icon = |template: &str| {
            svg::Handle::from_memory(template.replace("{color}", color).into_bytes())
        };

        Self {
            maximize: icon(ICON_MAXIMIZE),
            restore: icon(ICON_RESTORE),
            close: icon(ICON_CLOSE),
        }
    }
}

/// Theme colors resolved from their hex form.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Palette {
    background: Color,
    title_bar: Color,
    text: Color,
    button_hover: Color,
    close_hover: Color,
}

impl Palette {
    fn from_theme(theme: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let resolve = |value: &str, fallback: &str| {
            parse_hex_color(value).unwrap_or_else(|| {
                log::warn!("invalid color {:?}, using {}", value, fallback);
                parse_hex_color(fallback).unwrap_or(Color::BLACK)
            })
        };

        Self {
            background: resolve(&theme.background, &defaults.background),
            title_bar: resolve(&theme.title_bar, &defaults.title_bar),
            text: resolve(&theme.text, &defaults.text),
            button_hover: resolve(&theme.button_hover, &defaults.button_hover),
            close_hover: resolve(&theme.close_hover, &defaults.close_hover),
        }
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();

    match digits.len() {
        6 => Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color::from_rgba8(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)? as f32 / 255.0,
        )),
        _ => None,
    }
}

// =============== STYLES ===============

struct FillStyle {
    color: Color,
}
impl container::StyleSheet for FillStyle {
    type Style = Theme;
    fn appearance(&self, _: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(iced::Background::Color(self.color)),
            ..Default::default()
        }
    }
}

struct ControlButtonStyle {
    hover: Color,
}
impl button::StyleSheet for ControlButtonStyle {
    type Style = Theme;
    fn active(&self, _: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            border: iced::Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(iced::Background::Color(self.hover)),
            ..self.active(style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resizes_trigger_a_state_refresh() {
        let resized = Event::Window(
            window::Id::MAIN,
            window::Event::Resized {
                width: 1920,
                height: 1040,
            },
        );
        assert!(matches!(
            window_event(resized, event::Status::Ignored),
            Some(Message::WindowResized)
        ));

        let moved = Event::Window(window::Id::MAIN, window::Event::Moved { x: 40, y: 40 });
        assert!(window_event(moved, event::Status::Ignored).is_none());
        assert!(window_event(
            Event::Window(window::Id::MAIN, window::Event::Focused),
            event::Status::Captured
        )
        .is_none());
    }

    #[test]
    fn parses_rgb_and_rgba_hex() {
        assert_eq!(parse_hex_color("#E81123"), Some(Color::from_rgb8(0xE8, 0x11, 0x23)));
        assert_eq!(
            parse_hex_color("#00000080"),
            Some(Color::from_rgba8(0, 0, 0, 128.0 / 255.0))
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex_color("E81123"), None);
        assert_eq!(parse_hex_color("#E8112"), None);
        assert_eq!(parse_hex_color("#GG1123"), None);
        assert_eq!(parse_hex_color("#é81123"), None);
    }

    #[test]
    fn invalid_theme_colors_fall_back_to_defaults() {
        let theme = ThemeConfig {
            title_bar: "navy".to_string(),
            ..ThemeConfig::default()
        };

        let palette = Palette::from_theme(&theme);

        assert_eq!(palette, Palette::from_theme(&ThemeConfig::default()));
        assert_eq!(palette.title_bar, Color::from_rgb8(0x1E, 0x1E, 0x1E));
    }
}
