use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

const FONT_NAME: &str = "cjk";

/// Common locations of a Japanese-capable font, tried in order when no
/// `--font` is given.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

/// egui's bundled fonts have no Japanese glyphs; register one as a
/// fallback for both families. A missing font is logged, not fatal.
pub fn install_cjk_font(ctx: &egui::Context, explicit: Option<&Path>) {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(find_system_font) else {
        log::warn!("No Japanese font found; labels may render as boxes (use --font)");
        return;
    };

    match font_definitions(&path) {
        Ok(fonts) => {
            log::info!("Using font {}", path.display());
            ctx.set_fonts(fonts);
        }
        Err(e) => log::warn!("Ignoring font: {e:#}"),
    }
}

fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONTS.iter().map(PathBuf::from).find(|p| p.is_file())
}

fn font_definitions(path: &Path) -> Result<FontDefinitions> {
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_NAME.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FONT_NAME.to_owned());
    }
    Ok(fonts)
}
