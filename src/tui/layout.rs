/// Responsive breakpoints for TUI layout decisions.
///
/// Width thresholds live here, not in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: split pane, minimal terminal
    Compact,
    /// 60-99 cols: half-screen
    Normal,
    /// 100+ cols: full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    /// List and detail side by side; below this they are stacked
    pub fn side_by_side(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }

    /// Percentage of the content width given to the book list
    pub fn list_percent(&self) -> u16 {
        match self {
            Breakpoint::Compact => 100,
            Breakpoint::Normal => 40,
            Breakpoint::Wide => 30,
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
    }

    #[test]
    fn compact_terminals_stack_panels() {
        assert!(!Breakpoint::Compact.side_by_side());
        assert!(Breakpoint::Normal.side_by_side());
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Normal.at_least(Breakpoint::Wide));
    }
}
