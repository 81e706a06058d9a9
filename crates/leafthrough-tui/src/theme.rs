use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,

    // Foreground colors
    pub fg0: Color,
    pub dim: Color,

    // Semantic colors
    pub heading: Color,
    pub link: Color,
    pub link_disabled: Color,
    pub active: Color,
    pub tags: Color,
    pub error: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            dim: Color::Rgb(0x92, 0x83, 0x74),
            heading: Color::Rgb(0xd8, 0xa6, 0x57),
            link: Color::Rgb(0x7d, 0xae, 0xa3),
            link_disabled: Color::Rgb(0x7c, 0x6f, 0x64),
            active: Color::Rgb(0xa9, 0xb6, 0x65),
            tags: Color::Rgb(0x89, 0xb4, 0x82),
            error: Color::Rgb(0xea, 0x69, 0x62),
            status_bg: Color::Rgb(0x45, 0x40, 0x3d),
            status_fg: Color::Rgb(0xdd, 0xc7, 0xa1),
        }
    }
}
