//! Overlay styling for indoor map features.
//!
//! Only "units" and "levels" layers are drawn. Everything else is passed
//! through without an overlay.

use strum_macros::{Display, EnumString};

/// Standard indoor map layer types, named after the venue data files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LayerKind {
    Levels,
    Points,
    Units,
    Openings,
    Occupants,
    Buildings,
    Fixtures,
    Zones,
    Venue,
    Anchors,
    #[strum(serialize = "building_mesh", serialize = "buildingmesh")]
    BuildingMesh,
    Details,
    Sections,
    Addresses,
    Footprints,
    Kiosks,
    Relationships,
    #[strum(default)]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Color {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub stroke_color: Color,
    pub fill_color: Option<Color>,
    pub stroke_width: f32,
}

// Matches the rendering SDK's default line width.
const DEFAULT_STROKE_WIDTH: f32 = 1.0;
const UNIT_STROKE_WIDTH: f32 = 0.5;

impl OverlayStyle {
    pub const FILLED_UNIT: Self = Self {
        stroke_color: Color::Black,
        fill_color: Some(Color::White),
        stroke_width: UNIT_STROKE_WIDTH,
    };

    pub const OUTLINED_UNIT: Self = Self {
        stroke_color: Color::Black,
        fill_color: None,
        stroke_width: UNIT_STROKE_WIDTH,
    };

    pub const LEVEL: Self = Self {
        stroke_color: Color::Black,
        fill_color: Some(Color::White),
        stroke_width: DEFAULT_STROKE_WIDTH,
    };

    pub fn is_filled(&self) -> bool {
        self.fill_color.is_some()
    }
}

const ROOM_CATEGORIES: [&str; 2] = ["Room", "room"];
const VERTICAL_TRANSPORT: [&str; 3] = ["Stairs", "Escalator", "Elevator"];

/// Picks the overlay style for a feature, or `None` when it is not drawn.
///
/// Units without a category are not drawn. Room names match exactly (both
/// listed spellings); vertical transport matches by substring and is
/// case-sensitive.
pub fn style_feature(layer: &LayerKind, category: Option<&str>) -> Option<OverlayStyle> {
    match layer {
        LayerKind::Units => {
            let category = category?;
            if ROOM_CATEGORIES.iter().any(|room| *room == category)
                || VERTICAL_TRANSPORT.iter().any(|kind| category.contains(kind))
            {
                Some(OverlayStyle::FILLED_UNIT)
            } else {
                Some(OverlayStyle::OUTLINED_UNIT)
            }
        }
        LayerKind::Levels => Some(OverlayStyle::LEVEL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooms_are_filled() {
        for category in ["Room", "room"] {
            assert_eq!(
                style_feature(&LayerKind::Units, Some(category)),
                Some(OverlayStyle::FILLED_UNIT),
                "category {category}"
            );
        }
        assert_eq!(
            style_feature(&LayerKind::Units, Some("ROOM")),
            Some(OverlayStyle::OUTLINED_UNIT)
        );
    }

    #[test]
    fn test_vertical_transport_matches_substring() {
        for category in ["Freight Elevator Room", "Stairs", "Escalator Up"] {
            assert_eq!(
                style_feature(&LayerKind::Units, Some(category)),
                Some(OverlayStyle::FILLED_UNIT),
                "category {category}"
            );
        }
        assert_eq!(
            style_feature(&LayerKind::Units, Some("elevator")),
            Some(OverlayStyle::OUTLINED_UNIT)
        );
    }

    #[test]
    fn test_other_units_are_outlined() {
        let style = style_feature(&LayerKind::Units, Some("Gate")).unwrap();
        assert_eq!(style, OverlayStyle::OUTLINED_UNIT);
        assert!(!style.is_filled());
        assert_eq!(style.stroke_width, 0.5);
    }

    #[test]
    fn test_units_without_category_are_skipped() {
        assert_eq!(style_feature(&LayerKind::Units, None), None);
    }

    #[test]
    fn test_levels_always_filled() {
        for category in [None, Some("Gate"), Some("Room")] {
            assert_eq!(
                style_feature(&LayerKind::Levels, category),
                Some(OverlayStyle::LEVEL)
            );
        }
    }

    #[test]
    fn test_other_layers_pass_through() {
        for layer in [
            LayerKind::Openings,
            LayerKind::Fixtures,
            LayerKind::Venue,
            LayerKind::Other("parking".to_string()),
        ] {
            assert_eq!(style_feature(&layer, Some("Room")), None, "layer {layer}");
        }
    }

    #[test]
    fn test_layer_names_parse_case_insensitively() {
        assert_eq!("Units".parse::<LayerKind>().unwrap(), LayerKind::Units);
        assert_eq!("LEVELS".parse::<LayerKind>().unwrap(), LayerKind::Levels);
        assert_eq!(
            "BuildingMesh".parse::<LayerKind>().unwrap(),
            LayerKind::BuildingMesh
        );
        assert_eq!(
            "parking".parse::<LayerKind>().unwrap(),
            LayerKind::Other("parking".to_string())
        );
    }
}
