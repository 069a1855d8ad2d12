use eframe::egui::Color32;
use palette::Srgb;
use palette::named;

use loweels::data::model::SpectrumRole;

// ---------------------------------------------------------------------------
// Curve colours
// ---------------------------------------------------------------------------

fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Colour of a slot's curve, identical in every chart.
pub fn role_color(role: SpectrumRole) -> Color32 {
    match role {
        SpectrumRole::Reference1 => to_color32(named::ROYALBLUE),
        SpectrumRole::Reference2 => to_color32(named::INDIANRED),
        SpectrumRole::Unknown => to_color32(named::ORANGE),
    }
}

/// Title colour of the combined chart (CSS `rebeccapurple`).
pub fn title_color() -> Color32 {
    to_color32(Srgb::new(102, 51, 153))
}

/// Curve colour of the start-up preview.
pub fn preview_color() -> Color32 {
    to_color32(named::STEELBLUE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_is_orange() {
        assert_eq!(role_color(SpectrumRole::Unknown), Color32::from_rgb(255, 165, 0));
    }

    #[test]
    fn roles_are_distinct() {
        let colors: Vec<Color32> = SpectrumRole::ALL.iter().map(|&r| role_color(r)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
