use serde::{Deserialize, Serialize};

/// Fill colors as CSS color strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub stem: String,
    pub center: String,
    pub seed: String,
    pub seed_crease: String,
    /// Shared by petals and confetti
    pub palette: Vec<String>,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            stem: "#96B16D".to_string(),
            center: "#F9A602".to_string(),
            seed: "#E6C898".to_string(),
            seed_crease: "#997D50".to_string(),
            palette: vec![
                "#FFFEFA".to_string(),
                "#FFFACD".to_string(),
                "#FFD1DC".to_string(),
                "#D0E8F2".to_string(),
            ],
        }
    }
}

impl Colors {
    /// Check every color looks like `#rgb`, `#rrggbb` or a functional notation
    pub fn validate(&self) -> Result<(), String> {
        if self.palette.is_empty() {
            return Err("Palette must contain at least one color".to_string());
        }
        let named = [
            ("stem", &self.stem),
            ("center", &self.center),
            ("seed", &self.seed),
            ("seed_crease", &self.seed_crease),
        ];
        for (name, color) in named {
            if !is_css_color(color) {
                return Err(format!("Invalid {} color '{}'", name, color));
            }
        }
        for color in &self.palette {
            if !is_css_color(color) {
                return Err(format!("Invalid palette color '{}'", color));
            }
        }
        Ok(())
    }
}

fn is_css_color(s: &str) -> bool {
    if let Some(hex) = s.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    s.starts_with("rgb") || s.starts_with("hsl")
}
