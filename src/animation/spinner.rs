/// Braille dot spinner frames shown while scanning
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_frame(tick_count: u64) -> char {
    let idx = (tick_count / 3) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Rotating quadrant for the Connecting screen
const BAR_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn bar_frame(tick_count: u64) -> &'static str {
    let idx = (tick_count / 4) as usize % BAR_FRAMES.len();
    BAR_FRAMES[idx]
}

/// Pulsing dot next to the active network
const PULSE_FRAMES: &[&str] = &["●", "●", "●", "○", "○"];

pub fn pulse_frame(tick_count: u64) -> &'static str {
    let idx = (tick_count / 5) as usize % PULSE_FRAMES.len();
    PULSE_FRAMES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_wrap_around() {
        assert_eq!(spinner_frame(0), spinner_frame(3 * SPINNER_FRAMES.len() as u64));
        assert_eq!(bar_frame(0), "◐");
        assert_eq!(bar_frame(4), "◓");
        assert_eq!(pulse_frame(15), "○");
    }
}
