/// Colors cycled over pie, donut and funnel entries.
pub const PALETTE: [&str; 8] = [
    "#3B82F6", "#14B8A6", "#F97316", "#EF4444", "#8B5CF6", "#10B981", "#F59E0B", "#EC4899",
];

/// Colors cycled over treemap and radial bar entries.
pub const EXTENDED_PALETTE: [&str; 16] = [
    "#3B82F6", "#14B8A6", "#F97316", "#EF4444", "#8B5CF6", "#10B981", "#F59E0B", "#EC4899",
    "#06B6D4", "#84CC16", "#F43F5E", "#8B5A2B", "#6366F1", "#D946EF", "#0EA5E9", "#22C55E",
];

/// Color of the entry at `index`, cycling [`PALETTE`].
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Color of the entry at `index`, cycling [`EXTENDED_PALETTE`].
pub fn extended_palette_color(index: usize) -> &'static str {
    EXTENDED_PALETTE[index % EXTENDED_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_by_index() {
        assert_eq!(palette_color(0), "#3B82F6");
        assert_eq!(palette_color(8), "#3B82F6");
        assert_eq!(palette_color(13), PALETTE[5]);
        assert_eq!(extended_palette_color(15), "#22C55E");
        assert_eq!(extended_palette_color(16), "#3B82F6");
    }

    #[test]
    fn extended_palette_starts_with_base_palette() {
        assert_eq!(&EXTENDED_PALETTE[..8], &PALETTE[..]);
    }
}
