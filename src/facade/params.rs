use serde::{Deserialize, Serialize};

use super::curtain_wall::CurtainWallError;

/// Dimensions of a curtain wall, all in the guide's length unit.
///
/// Missing fields deserialize to their defaults, so a partial JSON object
/// such as `{"stories": 3}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainWallParams {
    /// Target distance between mullions.
    pub mullion_spacing: f64,
    pub mullion_width: f64,
    pub mullion_depth: f64,
    pub transom_height: f64,
    pub transom_depth: f64,
    pub panel_thickness: f64,
    /// Distance from the mullion's outer face to the glass's outer face.
    pub glass_inset: f64,
    /// Clearance between glass and the surrounding frame, on every side.
    pub glass_gap: f64,
    pub story_height: f64,
    pub stories: usize,
}

impl Default for CurtainWallParams {
    fn default() -> Self {
        Self {
            mullion_spacing: 1350.0,
            mullion_width: 60.0,
            mullion_depth: 120.0,
            transom_height: 60.0,
            transom_depth: 120.0,
            panel_thickness: 24.0,
            glass_inset: 40.0,
            glass_gap: 12.0,
            story_height: 3200.0,
            stories: 1,
        }
    }
}

impl CurtainWallParams {
    /// Named numeric fields, in declaration order.
    #[must_use]
    pub fn dimensions(&self) -> [(&'static str, f64); 9] {
        [
            ("mullion_spacing", self.mullion_spacing),
            ("mullion_width", self.mullion_width),
            ("mullion_depth", self.mullion_depth),
            ("transom_height", self.transom_height),
            ("transom_depth", self.transom_depth),
            ("panel_thickness", self.panel_thickness),
            ("glass_inset", self.glass_inset),
            ("glass_gap", self.glass_gap),
            ("story_height", self.story_height),
        ]
    }

    /// Rejects non-finite dimensions and a non-positive spacing.
    ///
    /// Negative insets and gaps are valid layouts. Extents that end up zero or
    /// negative are skipped per element during assembly.
    pub fn validate(&self) -> Result<(), CurtainWallError> {
        for (name, value) in self.dimensions() {
            if !value.is_finite() {
                return Err(CurtainWallError::InvalidParameter { name, value });
            }
        }
        if self.mullion_spacing <= 0.0 {
            return Err(CurtainWallError::InvalidParameter {
                name: "mullion_spacing",
                value: self.mullion_spacing,
            });
        }
        Ok(())
    }

    /// Base elevation offset of story `index`.
    #[must_use]
    pub fn story_base(&self, index: usize) -> f64 {
        index as f64 * self.story_height
    }

    /// Lateral offset of the glass centre plane from the guide line, toward
    /// negative lateral.
    #[must_use]
    pub fn glass_offset(&self) -> f64 {
        self.mullion_depth * 0.5 - self.glass_inset - self.panel_thickness * 0.5
    }
}
