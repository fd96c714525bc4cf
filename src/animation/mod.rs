pub mod spinner;

/// Frame counter driving every animated glyph
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimationState {
    /// Monotonically increasing tick counter
    pub tick_count: u64,
}

impl AnimationState {
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Check if cursor should be visible (blink effect)
    pub fn cursor_visible(&self) -> bool {
        // 70% duty cycle: visible for 14 out of 20 ticks
        (self.tick_count % 20) < 14
    }
}
