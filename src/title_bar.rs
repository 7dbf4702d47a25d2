//! Drag region of the custom title bar.
//!
//! Wraps the title content and turns presses on it into window requests. The status
//! returned from `on_event` is what the controls decided, so a press that starts a
//! move is consumed here and never reaches the widgets behind it.

use crate::controls::{self, Control, WindowRequest, WindowState};
use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer;
use iced::advanced::widget::{Tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::event::{self, Event};
use iced::mouse;
use iced::{Element, Length, Rectangle, Size};

pub struct TitleBar<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer> {
    content: Element<'a, Message, Theme, Renderer>,
    window_state: WindowState,
    on_request: fn(WindowRequest) -> Message,
}

impl<'a, Message, Theme, Renderer> TitleBar<'a, Message, Theme, Renderer> {
    pub fn new(
        content: impl Into<Element<'a, Message, Theme, Renderer>>,
        window_state: WindowState,
        on_request: fn(WindowRequest) -> Message,
    ) -> Self {
        Self {
            content: content.into(),
            window_state,
            on_request,
        }
    }
}

/// Decides what a single event over the title bar does.
fn handle_event<Message>(
    event: &Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
    window_state: WindowState,
    on_request: fn(WindowRequest) -> Message,
) -> (Option<Message>, event::Status) {
    let Event::Mouse(mouse::Event::ButtonPressed(button)) = event else {
        return (None, event::Status::Ignored);
    };
    if !cursor.is_over(bounds) {
        return (None, event::Status::Ignored);
    }

    let response = controls::respond(Control::TitleBar(*button), window_state);
    (response.request.map(on_request), response.status)
}

impl<'a, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for TitleBar<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> event::Status {
        if let event::Status::Captured = self.content.as_widget_mut().on_event(
            &mut tree.children[0],
            event.clone(),
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        ) {
            return event::Status::Captured;
        }

        let (message, status) = handle_event(
            &event,
            layout.bounds(),
            cursor,
            self.window_state,
            self.on_request,
        );
        if let Some(message) = message {
            shell.publish(message);
        }
        status
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            cursor,
            viewport,
            renderer,
        )
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            style,
            layout,
            cursor,
            viewport,
        );
    }
}

impl<'a, Message, Theme, Renderer> From<TitleBar<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: 'a + renderer::Renderer,
{
    fn from(title_bar: TitleBar<'a, Message, Theme, Renderer>) -> Self {
        Element::new(title_bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    const BOUNDS: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 640.0,
        height: 32.0,
    };

    fn forward(request: WindowRequest) -> WindowRequest {
        request
    }

    fn press(button: mouse::Button) -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(button))
    }

    fn inside() -> mouse::Cursor {
        mouse::Cursor::Available(Point::new(120.0, 16.0))
    }

    #[test]
    fn primary_press_requests_one_move_and_is_captured() {
        let (message, status) = handle_event(
            &press(mouse::Button::Left),
            BOUNDS,
            inside(),
            WindowState::Normal,
            forward,
        );

        assert_eq!(message, Some(WindowRequest::Drag));
        assert_eq!(status, event::Status::Captured);
    }

    #[test]
    fn each_press_yields_its_own_move() {
        let moves = (0..3)
            .filter_map(|_| {
                handle_event(
                    &press(mouse::Button::Left),
                    BOUNDS,
                    inside(),
                    WindowState::Maximized,
                    forward,
                )
                .0
            })
            .count();

        assert_eq!(moves, 3);
    }

    #[test]
    fn secondary_press_passes_through() {
        for button in [mouse::Button::Right, mouse::Button::Middle] {
            let (message, status) =
                handle_event(&press(button), BOUNDS, inside(), WindowState::Normal, forward);

            assert_eq!(message, None);
            assert_eq!(status, event::Status::Ignored);
        }
    }

    #[test]
    fn press_outside_bounds_passes_through() {
        let cursor = mouse::Cursor::Available(Point::new(700.0, 16.0));

        let (message, status) = handle_event(
            &press(mouse::Button::Left),
            BOUNDS,
            cursor,
            WindowState::Normal,
            forward,
        );

        assert_eq!(message, None);
        assert_eq!(status, event::Status::Ignored);

        let (message, status) = handle_event(
            &press(mouse::Button::Left),
            BOUNDS,
            mouse::Cursor::Unavailable,
            WindowState::Normal,
            forward,
        );
        assert_eq!(message, None);
        assert_eq!(status, event::Status::Ignored);
    }

    #[test]
    fn release_and_movement_are_not_consumed() {
        let events = [
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
            Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(10.0, 10.0),
            }),
        ];

        for other in events {
            let (message, status) =
                handle_event(&other, BOUNDS, inside(), WindowState::Normal, forward);
            assert_eq!(message, None);
            assert_eq!(status, event::Status::Ignored);
        }
    }
}
