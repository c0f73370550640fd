//! Editor configuration.
//!
//! Config files are YAML. Every field is optional; anything left out takes
//! the default, so an empty file is a valid config:
//!
//! ```yaml
//! canvas:
//!   width: 1024
//!   height: 768
//! hit_tolerance: 3.0
//! default_color: [0, 120, 255]
//! show_outlines: true
//! palette:
//!   - [255, 0, 0]
//!   - [0, 160, 0]
//! snapshot_dir: ./shots
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fillpoly::{Editor, Rgb, Scene, DEFAULT_HIT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Canvas (drawing area) size in canvas units, which map 1:1 to pixels in
/// PNG output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

/// Everything the terminal editor reads at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasConfig,

    /// Edge-proximity tolerance for selection clicks
    pub hit_tolerance: f64,

    /// Color committed polygons get until the user picks another
    pub default_color: Rgb,

    /// Whether outlines start visible
    pub show_outlines: bool,

    /// Colors cycled by the palette key
    pub palette: Vec<Rgb>,

    /// Directory PNG snapshots are written to
    pub snapshot_dir: PathBuf,
}

fn default_palette() -> Vec<Rgb> {
    vec![
        Rgb(255, 0, 0),
        Rgb(255, 140, 0),
        Rgb(230, 200, 0),
        Rgb(0, 160, 0),
        Rgb(0, 170, 200),
        Rgb(0, 60, 255),
        Rgb(140, 0, 200),
        Rgb(90, 90, 90),
    ]
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            default_color: Rgb::default(),
            show_outlines: true,
            palette: default_palette(),
            snapshot_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    /// Load and validate a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate a config from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as null, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EditorConfig =
            serde_yaml::from_str(content).context("failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the editor can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            bail!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas.width,
                self.canvas.height
            );
        }
        if !self.hit_tolerance.is_finite() || self.hit_tolerance < 0.0 {
            bail!("hit_tolerance must be a non-negative number, got {}", self.hit_tolerance);
        }
        if self.palette.is_empty() {
            bail!("palette needs at least one color");
        }
        Ok(())
    }

    /// Build a fresh editor session from this config.
    pub fn build_editor(&self) -> Editor {
        Editor::new(Scene::with_hit_tolerance(self.hit_tolerance))
            .with_color(self.default_color)
            .with_outlines(self.show_outlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(EditorConfig::from_yaml("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = EditorConfig::from_yaml(
            "canvas:\n  width: 320\nhit_tolerance: 4.5\ndefault_color: [0, 128, 255]\n",
        )
        .unwrap();
        assert_eq!(config.canvas, CanvasConfig { width: 320, height: 600 });
        assert_eq!(config.hit_tolerance, 4.5);
        assert_eq!(config.default_color, Rgb(0, 128, 255));
        assert!(config.show_outlines);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(EditorConfig::from_yaml("hit_tolerance: -1.0\n").is_err());
        assert!(EditorConfig::from_yaml("canvas:\n  width: 0\n").is_err());
        assert!(EditorConfig::from_yaml("palette: []\n").is_err());
        assert!(EditorConfig::from_yaml("default_color: [300, 0, 0]\n").is_err());
    }

    #[test]
    fn builds_editor_with_settings() {
        let config = EditorConfig::from_yaml(
            "hit_tolerance: 6.0\ndefault_color: [1, 2, 3]\nshow_outlines: false\n",
        )
        .unwrap();
        let editor = config.build_editor();
        assert_eq!(editor.scene().hit_tolerance(), 6.0);
        assert_eq!(editor.current_color(), Rgb(1, 2, 3));
        assert!(!editor.show_outlines());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.yaml");
        fs::write(&path, "show_outlines: false\n").unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert!(!config.show_outlines);

        assert!(EditorConfig::load(dir.path().join("missing.yaml")).is_err());
    }
}
