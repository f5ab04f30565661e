use neon_draw_protocol::StrokeData;

/// The drawing canvas as seen by the controller. The controller creates one
/// lazily when the first turn starts and destroys it on cleanup.
pub trait DrawingSurface {
    /// Render a stroke segment pushed by the drawer.
    fn draw_from_data(&mut self, data: &StrokeData);
    fn clear(&mut self);
    /// `true` lets the local user sketch, `false` makes the surface read-only.
    fn set_draw_mode(&mut self, enabled: bool);
    /// Release whatever the surface holds. Called right before it is dropped.
    fn destroy(&mut self);
}

/// Surface for front ends that cannot show a picture (the terminal client).
/// It only keeps count of what it was asked to do.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StrokeCounter {
    pub strokes: usize,
    pub clears: usize,
    pub draw_mode: bool,
    pub destroyed: bool,
}

impl DrawingSurface for StrokeCounter {
    fn draw_from_data(&mut self, _data: &StrokeData) {
        self.strokes += 1;
    }

    fn clear(&mut self) {
        self.strokes = 0;
        self.clears += 1;
    }

    fn set_draw_mode(&mut self, enabled: bool) {
        self.draw_mode = enabled;
    }

    fn destroy(&mut self) {
        self.strokes = 0;
        self.destroyed = true;
    }
}
