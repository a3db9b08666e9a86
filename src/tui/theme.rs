//! Theme for the grid browser, consistent with the CLI's row coloring.

use iocraft::prelude::Color;

use crate::grid::{CustomerTone, TicketTone};

#[derive(Debug, Clone)]
pub struct Theme {
    // Row tones (matching display.rs)
    pub tone_completed: Color,
    pub tone_unassigned: Color,
    pub tone_in_progress: Color,
    pub tone_active: Color,
    pub tone_inactive: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tone_completed: Color::Green,
            tone_unassigned: Color::Red,
            tone_in_progress: Color::Yellow,
            tone_active: Color::Green,
            tone_inactive: Color::Red,

            border: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            border_focused: Color::Blue,
            text: Color::White,
            text_dimmed: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            highlight: Color::Blue,
            header: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn ticket_tone_color(&self, tone: TicketTone) -> Color {
        match tone {
            TicketTone::Completed => self.tone_completed,
            TicketTone::Unassigned => self.tone_unassigned,
            TicketTone::InProgress => self.tone_in_progress,
        }
    }

    pub fn customer_tone_color(&self, tone: CustomerTone) -> Color {
        match tone {
            CustomerTone::Active => self.tone_active,
            CustomerTone::Inactive => self.tone_inactive,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

pub fn theme() -> &'static Theme {
    &THEME
}
