use iced::mouse;
use iced::widget::canvas::{self, event, Canvas, Frame, Path as CanvasPath, Stroke};
use iced::{Element, Point, Rectangle, Renderer, Theme};

use neon_draw::surface::DrawingSurface;
use neon_draw_protocol::{CanvasPoint, StrokeData};

use super::theme::{hex_color, TEXT};
use crate::messages::Msg;

/// Widths are given in pixels of a canvas this wide and scaled from there.
const REFERENCE_WIDTH: f32 = 800.0;

pub const PALETTE: [&str; 10] = [
    "#000000", "#ffffff", "#ef4444", "#f97316", "#facc15", "#22c55e", "#06b6d4", "#3b82f6", "#a855f7", "#ec4899",
];
pub const WIDTHS: [f32; 4] = [2.0, 5.0, 10.0, 20.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: &'static str,
    pub width: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self { color: PALETTE[0], width: WIDTHS[1] }
    }
}

/// The shared picture. Strokes are kept so the cached geometry can be
/// rebuilt when the widget is resized.
pub struct Sketchpad {
    strokes: Vec<StrokeData>,
    draw_mode: bool,
    cache: canvas::Cache,
}

impl Default for Sketchpad {
    fn default() -> Self {
        Self { strokes: Vec::new(), draw_mode: false, cache: canvas::Cache::new() }
    }
}

impl Sketchpad {
    pub fn can_draw(&self) -> bool {
        self.draw_mode
    }
}

impl DrawingSurface for Sketchpad {
    fn draw_from_data(&mut self, data: &StrokeData) {
        self.strokes.push(data.clone());
        self.cache.clear();
    }

    fn clear(&mut self) {
        self.strokes.clear();
        self.cache.clear();
    }

    fn set_draw_mode(&mut self, enabled: bool) {
        self.draw_mode = enabled;
    }

    fn destroy(&mut self) {
        self.strokes = Vec::new();
        self.draw_mode = false;
        self.cache.clear();
    }
}

/// A sketchpad paired with the brush the local user draws with.
struct Pad<'a> {
    sketch: &'a Sketchpad,
    brush: Brush,
}

fn normalise(p: Point, bounds: Rectangle) -> CanvasPoint {
    CanvasPoint::new(p.x / bounds.width, p.y / bounds.height).clamped()
}

impl canvas::Program<Msg> for Pad<'_> {
    /// Last pen position while the button is held.
    type State = Option<CanvasPoint>;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Msg>) {
        if !self.sketch.draw_mode {
            *state = None;
            return (event::Status::Ignored, None);
        }
        let canvas::Event::Mouse(mouse_event) = event else {
            return (event::Status::Ignored, None);
        };
        match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => match cursor.position_in(bounds) {
                Some(p) => {
                    *state = Some(normalise(p, bounds));
                    (event::Status::Captured, None)
                }
                None => (event::Status::Ignored, None),
            },
            mouse::Event::CursorMoved { .. } => {
                let (Some(from), Some(p)) = (*state, cursor.position_in(bounds)) else {
                    return (event::Status::Ignored, None);
                };
                let to = normalise(p, bounds);
                *state = Some(to);
                let data = StrokeData { from, to, color: self.brush.color.to_string(), width: self.brush.width };
                (event::Status::Captured, Some(Msg::Stroke(data)))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) | mouse::Event::CursorLeft => {
                *state = None;
                (event::Status::Ignored, None)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let picture = self.sketch.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            frame.fill_rectangle(Point::ORIGIN, frame.size(), iced::Color::WHITE);
            let scale = frame.width() / REFERENCE_WIDTH;
            for s in &self.sketch.strokes {
                let from = Point::new(s.from.x * frame.width(), s.from.y * frame.height());
                let to = Point::new(s.to.x * frame.width(), s.to.y * frame.height());
                let color = hex_color(&s.color).unwrap_or(iced::Color::BLACK);
                frame.stroke(
                    &CanvasPath::line(from, to),
                    Stroke::default()
                        .with_color(color)
                        .with_width((s.width * scale).max(1.0))
                        .with_line_cap(canvas::LineCap::Round),
                );
            }
        });
        vec![picture]
    }

    fn mouse_interaction(&self, _state: &Self::State, bounds: Rectangle, cursor: mouse::Cursor) -> mouse::Interaction {
        if self.sketch.draw_mode && cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

pub fn sketchpad(sketch: &Sketchpad, brush: Brush) -> Element<'_, Msg> {
    Canvas::new(Pad { sketch, brush })
        .width(iced::Length::Fill)
        .height(iced::Length::Fixed(480.0))
        .into()
}

/// Shown before the first turn creates a surface.
pub fn empty_pad() -> Element<'static, Msg> {
    iced_widget::container(iced_widget::text("The canvas appears when the game starts").color(TEXT))
        .width(iced::Length::Fill)
        .height(iced::Length::Fixed(480.0))
        .center_x(iced::Length::Fill)
        .center_y(iced::Length::Fill)
        .style(|_| super::theme::plate())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> StrokeData {
        StrokeData { from: CanvasPoint::new(0.0, 0.0), to: CanvasPoint::new(1.0, 1.0), color: "#ef4444".into(), width: 5.0 }
    }

    #[test]
    fn keeps_strokes_until_cleared() {
        let mut pad = Sketchpad::default();
        pad.set_draw_mode(true);
        pad.draw_from_data(&segment());
        pad.draw_from_data(&segment());
        assert_eq!(pad.strokes.len(), 2);
        assert!(pad.can_draw());

        pad.clear();
        assert!(pad.strokes.is_empty());

        pad.draw_from_data(&segment());
        pad.destroy();
        assert!(pad.strokes.is_empty());
        assert!(!pad.can_draw());
    }

    #[test]
    fn positions_are_normalised() {
        let bounds = Rectangle::new(Point::ORIGIN, iced::Size::new(400.0, 200.0));
        assert_eq!(normalise(Point::new(100.0, 50.0), bounds), CanvasPoint::new(0.25, 0.25));
        assert_eq!(normalise(Point::new(900.0, -5.0), bounds), CanvasPoint::new(1.0, 0.0));
    }
}
