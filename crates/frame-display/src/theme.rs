//! Theme colors.
//!
//! Threshold steps and mappings name colors (`green`, `semi-dark-red`) or
//! give literal hex/rgb strings. A [`Theme`] turns names into hex for the
//! active mode; anything it does not know passes through unchanged.

use serde::{Deserialize, Serialize};

/// Light or dark rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(format!("Unknown theme mode: {s}")),
        }
    }
}

/// `(name, dark, light)`
const NAMED_COLORS: &[(&str, &str, &str)] = &[
    ("dark-red", "#C4162A", "#AD0317"),
    ("semi-dark-red", "#E02F44", "#C4162A"),
    ("red", "#F2495C", "#E02F44"),
    ("light-red", "#FF7383", "#FF7383"),
    ("super-light-red", "#FFA6B0", "#FFA6B0"),
    ("dark-orange", "#FA6400", "#E55400"),
    ("semi-dark-orange", "#FF780A", "#FA6400"),
    ("orange", "#FF9830", "#FF780A"),
    ("light-orange", "#FFB357", "#FFB357"),
    ("super-light-orange", "#FFCB7D", "#FFCB7D"),
    ("dark-yellow", "#E0B400", "#CC9D00"),
    ("semi-dark-yellow", "#F2CC0C", "#E0B400"),
    ("yellow", "#FADE2A", "#F2CC0C"),
    ("light-yellow", "#FFEE52", "#FFEE52"),
    ("super-light-yellow", "#FFF899", "#FFF899"),
    ("dark-green", "#37872D", "#19730E"),
    ("semi-dark-green", "#56A64B", "#37872D"),
    ("green", "#73BF69", "#56A64B"),
    ("light-green", "#96D98D", "#96D98D"),
    ("super-light-green", "#C8F2C2", "#C8F2C2"),
    ("dark-blue", "#1F60C4", "#1250B0"),
    ("semi-dark-blue", "#3274D9", "#1F60C4"),
    ("blue", "#5794F2", "#3274D9"),
    ("light-blue", "#8AB8FF", "#8AB8FF"),
    ("super-light-blue", "#C0D8FF", "#C0D8FF"),
    ("dark-purple", "#8F3BB8", "#7C2EA3"),
    ("semi-dark-purple", "#A352CC", "#8F3BB8"),
    ("purple", "#B877D9", "#A352CC"),
    ("light-purple", "#CA95E5", "#CA95E5"),
    ("super-light-purple", "#DEB6F2", "#DEB6F2"),
    ("transparent", "rgba(0,0,0,0)", "rgba(0,0,0,0)"),
    ("text", "#CCCCDC", "#24292E"),
];

/// Color resolver for one mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
        }
    }

    /// Resolve a color name to its hex value for this mode.
    pub fn resolve_color(&self, color: &str) -> String {
        let key = color.trim();
        NAMED_COLORS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(key))
            .map_or_else(
                || color.to_string(),
                |(_, dark, light)| match self.mode {
                    ThemeMode::Dark => (*dark).to_string(),
                    ThemeMode::Light => (*light).to_string(),
                },
            )
    }
}
