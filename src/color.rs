use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Single-series bars (Graphs I and III).
pub const BAR_GREY: &str = "#484848";
/// Year bars, and U.S. citizens / permanent residents in the breakdown.
pub const NAVY: &str = "#20283E";
/// Temporary visa holders in the breakdown.
pub const GOLD: &str = "#DBAE58";

/// Plot background and grid, after ggplot2's default theme.
pub const PANEL_BACKGROUND: Color32 = Color32::from_rgb(0xEB, 0xEB, 0xEB);

/// Parse a `#rrggbb` colour; malformed input falls back to grey.
pub fn parse_hex(hex: &str) -> Srgb<u8> {
    hex.parse::<Srgb<u8>>().unwrap_or_else(|e| {
        log::warn!("Invalid colour '{hex}': {e}");
        Srgb::new(0x80, 0x80, 0x80)
    })
}

pub fn to_color32(color: Srgb<u8>) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}
