use anyhow::{anyhow, Context, Result};
use rusttype::{Font, Scale};
use std::fs;
use std::path::Path;

pub(crate) struct FontConfig {
    pub font: Font<'static>,
    pub scale: Scale,
}

/// Faces used on the dashboard, all cut from one TrueType file.
pub struct Fonts {
    pub(crate) title: FontConfig,
    pub(crate) label: FontConfig,
}

impl Fonts {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).context(format!("Failed to read font {}", path.display()))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| anyhow!("{} is not a usable TrueType font", path.display()))?;

        Ok(Self {
            title: font_config(font.clone(), 20.0),
            label: font_config(font, 18.0),
        })
    }
}

fn font_config(font: Font<'static>, scale: f32) -> FontConfig {
    FontConfig {
        font,
        scale: Scale::uniform(scale),
    }
}
