use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Program};
use iced::widget::image::Handle;
use iced::{Point, Rectangle, Renderer, Size, Theme, Vector};
use std::io::Cursor as ByteCursor;
use std::path::PathBuf;
use tracing::info;

use crate::state::viewer::Offset;
use crate::Message;

/// A decoded-enough floor plan: bytes handed to iced plus pixel size
#[derive(Debug, Clone)]
pub struct PlanImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// What the modal body shows
#[derive(Debug, Clone)]
pub enum PlanImageState {
    Loading,
    Ready(PlanImage),
    Failed(String),
}

/// Pointer input forwarded from the canvas to the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Offset),
    Moved(Offset),
    /// `over_image` is true when the release landed on the drawn plan,
    /// which makes it a tap
    Released { over_image: bool },
    WheelUp,
    WheelDown,
}

/// Load a floor-plan image from disk
///
/// The file is read asynchronously; the header decode runs on a blocking
/// thread so large plans don't stall the UI.
pub async fn load_plan(path: PathBuf) -> Result<PlanImage, String> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read plan {}: {}", path.display(), e))?;

    let (bytes, (width, height)) = tokio::task::spawn_blocking(move || {
        let size = read_dimensions(&bytes)?;
        Ok::<_, String>((bytes, size))
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))??;

    info!("🗺️  Loaded plan {} ({}x{})", path.display(), width, height);

    Ok(PlanImage {
        handle: Handle::from_bytes(bytes),
        width,
        height,
    })
}

/// Read the pixel size from the image header without decoding it
fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), String> {
    ::image::ImageReader::new(ByteCursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image header: {}", e))?
        .into_dimensions()
        .map_err(|e| format!("Unsupported plan image: {}", e))
}


/// Canvas that draws the plan centered, scaled by zoom and shifted by pan
pub struct PlanCanvas {
    pub image: PlanImage,
    /// Zoom level (1.0 = fit to the modal)
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan: Offset,
}

/// State for drag interactions, kept by the canvas widget itself so a
/// release delivered in the same event batch as its press is still seen
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    pub is_dragging: bool,
}

impl PlanCanvas {
    /// Size of the image when fitted inside `bounds` at zoom 1.0
    fn fitted_size(&self, bounds: Size) -> Size {
        let width = self.image.width.max(1) as f32;
        let height = self.image.height.max(1) as f32;
        let scale = (bounds.width / width).min(bounds.height / height);
        Size::new(width * scale, height * scale)
    }

    /// Where the plan is actually drawn, in the same coordinates as `bounds`
    fn image_bounds(&self, bounds: Rectangle) -> Rectangle {
        let fitted = self.fitted_size(bounds.size());
        let size = Size::new(fitted.width * self.zoom, fitted.height * self.zoom);
        let center = bounds.center() + Vector::new(self.pan.x, self.pan.y);
        Rectangle::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }

    fn press(&self, state: &mut DragState, bounds: Rectangle, position: Point) -> Option<Message> {
        if !self.image_bounds(bounds).contains(position) {
            return None;
        }
        state.is_dragging = true;
        pointer(PointerEvent::Pressed(offset(position)))
    }

    fn release(
        &self,
        state: &mut DragState,
        bounds: Rectangle,
        position: Option<Point>,
    ) -> Option<Message> {
        state.is_dragging = false;
        let image = self.image_bounds(bounds);
        pointer(PointerEvent::Released {
            over_image: position.is_some_and(|p| image.contains(p)),
        })
    }
}

fn offset(point: Point) -> Offset {
    Offset::new(point.x, point.y)
}

fn pointer(event: PointerEvent) -> Option<Message> {
    Some(Message::Pointer(event))
}

fn handled(message: Option<Message>) -> (canvas::event::Status, Option<Message>) {
    match message {
        Some(message) => (canvas::event::Status::Captured, Some(message)),
        None => (canvas::event::Status::Ignored, None),
    }
}

impl Program<Message> for PlanCanvas {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let size = self.fitted_size(bounds.size());

        frame.translate(Vector::new(
            bounds.width / 2.0 + self.pan.x,
            bounds.height / 2.0 + self.pan.y,
        ));
        frame.scale(self.zoom);
        frame.draw_image(
            Rectangle::new(Point::new(-size.width / 2.0, -size.height / 2.0), size),
            canvas::Image::new(self.image.handle.clone()),
        );

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) if cursor.is_over(bounds) => {
                let y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y,
                };
                if y > 0.0 {
                    handled(pointer(PointerEvent::WheelUp))
                } else if y < 0.0 {
                    handled(pointer(PointerEvent::WheelDown))
                } else {
                    handled(None)
                }
            }

            // Press starts a drag, but only on the drawn plan
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                handled(cursor.position().and_then(|pos| self.press(state, bounds, pos)))
            }
            canvas::Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                handled(self.press(state, bounds, position))
            }

            // Moves are tracked anywhere in the window while dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position })
            | canvas::Event::Touch(touch::Event::FingerMoved { position, .. })
                if state.is_dragging =>
            {
                handled(pointer(PointerEvent::Moved(offset(position))))
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if state.is_dragging =>
            {
                handled(self.release(state, bounds, cursor.position()))
            }
            canvas::Event::Touch(touch::Event::FingerLifted { position, .. })
                if state.is_dragging =>
            {
                handled(self.release(state, bounds, Some(position)))
            }
            canvas::Event::Touch(touch::Event::FingerLost { .. }) if state.is_dragging => {
                handled(self.release(state, bounds, None))
            }

            _ => handled(None),
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.is_dragging {
            mouse::Interaction::Grabbing
        } else if cursor
            .position()
            .is_some_and(|pos| self.image_bounds(bounds).contains(pos))
        {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ::image::RgbImage::new(width, height);
        let mut out = ByteCursor::new(Vec::new());
        img.write_to(&mut out, ::image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// A 400x200 plan: in an 800x800 canvas it is drawn at y 200..600
    fn plan_canvas(zoom: f32, pan: Offset) -> PlanCanvas {
        PlanCanvas {
            image: PlanImage {
                handle: Handle::from_bytes(png_bytes(4, 2)),
                width: 400,
                height: 200,
            },
            zoom,
            pan,
        }
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(800.0, 800.0))
    }

    fn at(x: f32, y: f32) -> Cursor {
        Cursor::Available(Point::new(x, y))
    }

    fn mouse(event: mouse::Event) -> canvas::Event {
        canvas::Event::Mouse(event)
    }

    fn press() -> canvas::Event {
        mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn release() -> canvas::Event {
        mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
    }

    fn moved(x: f32, y: f32) -> canvas::Event {
        mouse(mouse::Event::CursorMoved {
            position: Point::new(x, y),
        })
    }

    #[test]
    fn test_read_dimensions() {
        assert_eq!(read_dimensions(&png_bytes(4, 2)), Ok((4, 2)));
        assert!(read_dimensions(b"definitely not an image").is_err());
    }

    #[test]
    fn test_fitted_size_keeps_aspect() {
        let plan = plan_canvas(1.0, Offset::ZERO);
        assert_eq!(plan.fitted_size(Size::new(800.0, 800.0)), Size::new(800.0, 400.0));
        assert_eq!(plan.fitted_size(Size::new(100.0, 20.0)), Size::new(40.0, 20.0));
    }

    #[test]
    fn test_image_bounds_follow_zoom_and_pan() {
        let plan = plan_canvas(1.0, Offset::ZERO);
        assert_eq!(
            plan.image_bounds(bounds()),
            Rectangle::new(Point::new(0.0, 200.0), Size::new(800.0, 400.0))
        );

        let plan = plan_canvas(2.0, Offset::new(10.0, 0.0));
        assert_eq!(
            plan.image_bounds(bounds()),
            Rectangle::new(Point::new(-390.0, 0.0), Size::new(1600.0, 800.0))
        );
    }

    #[test]
    fn test_moves_ignored_until_pressed() {
        let plan = plan_canvas(1.0, Offset::ZERO);
        let mut state = DragState::default();

        let (status, message) = plan.update(&mut state, moved(300.0, 300.0), bounds(), at(300.0, 300.0));
        assert_eq!(status, canvas::event::Status::Ignored);
        assert!(message.is_none());

        let (_, message) = plan.update(&mut state, release(), bounds(), at(300.0, 300.0));
        assert!(message.is_none());
    }

    #[test]
    fn test_press_and_release_in_one_batch() {
        // Same canvas value for both events, as when iced delivers them
        // together before the view is rebuilt
        let plan = plan_canvas(1.0, Offset::ZERO);
        let mut state = DragState::default();

        let (status, message) = plan.update(&mut state, press(), bounds(), at(400.0, 400.0));
        assert_eq!(status, canvas::event::Status::Captured);
        assert!(matches!(
            message,
            Some(Message::Pointer(PointerEvent::Pressed(p))) if p == Offset::new(400.0, 400.0)
        ));
        assert!(state.is_dragging);

        let (_, message) = plan.update(&mut state, release(), bounds(), at(400.0, 400.0));
        assert!(matches!(
            message,
            Some(Message::Pointer(PointerEvent::Released { over_image: true }))
        ));
        assert!(!state.is_dragging);
    }

    #[test]
    fn test_moves_forwarded_while_dragging() {
        let plan = plan_canvas(1.0, Offset::ZERO);
        let mut state = DragState::default();

        plan.update(&mut state, press(), bounds(), at(400.0, 400.0));
        let (_, message) = plan.update(&mut state, moved(420.0, 700.0), bounds(), at(420.0, 700.0));
        assert!(matches!(
            message,
            Some(Message::Pointer(PointerEvent::Moved(p))) if p == Offset::new(420.0, 700.0)
        ));

        // Released over the letterbox: ends the drag, but is not a tap
        let (_, message) = plan.update(&mut state, release(), bounds(), at(420.0, 700.0));
        assert!(matches!(
            message,
            Some(Message::Pointer(PointerEvent::Released { over_image: false }))
        ));
        assert!(!state.is_dragging);
    }

    #[test]
    fn test_press_on_letterbox_is_ignored() {
        let plan = plan_canvas(1.0, Offset::ZERO);
        let mut state = DragState::default();

        let (status, message) = plan.update(&mut state, press(), bounds(), at(400.0, 100.0));
        assert_eq!(status, canvas::event::Status::Ignored);
        assert!(message.is_none());
        assert!(!state.is_dragging);
    }

    #[test]
    fn test_touch_lift_ends_drag() {
        let plan = plan_canvas(1.0, Offset::ZERO);
        let mut state = DragState::default();
        let finger = touch::Finger(0);

        let (_, message) = plan.update(
            &mut state,
            canvas::Event::Touch(touch::Event::FingerPressed {
                id: finger,
                position: Point::new(100.0, 300.0),
            }),
            bounds(),
            Cursor::Unavailable,
        );
        assert!(matches!(message, Some(Message::Pointer(PointerEvent::Pressed(_)))));

        let (_, message) = plan.update(
            &mut state,
            canvas::Event::Touch(touch::Event::FingerLifted {
                id: finger,
                position: Point::new(100.0, 300.0),
            }),
            bounds(),
            Cursor::Unavailable,
        );
        assert!(matches!(
            message,
            Some(Message::Pointer(PointerEvent::Released { over_image: true }))
        ));
        assert!(!state.is_dragging);
    }

    #[tokio::test]
    async fn test_missing_plan_is_an_error() {
        let result = load_plan(PathBuf::from("/nonexistent/planos/A1.png")).await;
        assert!(result.unwrap_err().contains("Failed to read plan"));
    }
}
