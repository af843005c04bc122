use std::time::Duration;

/// Braille "dots" animation
const DOTS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub const INTERVAL: Duration = Duration::from_millis(80);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % DOTS.len();
    }

    pub fn frame(&self) -> &'static str {
        DOTS[self.frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        let mut spinner = Spinner::new();
        assert_eq!(spinner.frame(), "⠋");
        spinner.advance();
        assert_eq!(spinner.frame(), "⠙");
        for _ in 0..DOTS.len() - 1 {
            spinner.advance();
        }
        assert_eq!(spinner.frame(), "⠋");
    }
}
