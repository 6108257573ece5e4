use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const SECONDARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IP_ADDR: Color = Color::BrightGreen;
pub const CLEAN: Color = Color::Green;
pub const PROXY: Color = Color::BrightRed;
pub const VPN_DCH: Color = Color::Yellow;
pub const CHART_BAR: Color = Color::BrightMagenta;
