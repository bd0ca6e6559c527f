//=========================================================================
// Fonts
//=========================================================================
//
// The six fonts shared by every stage, and the panel image two of them
// are cut from.
//
// Construction:
// ```text
//   PANEL.000 ──load_fixed_block──► PanelImage
//                                     ├─ big_font_strip()   ─► PanelBig
//                                     └─ small_font_strip() ─► PanelSmall
//                                   (PanelImage dropped here)
//   FONT2.0FN / FONTBIG.0FN / FONTINY.0FN / FONTMN1.0FN ─► Main/Big/Tiny/Menu
// ```
//
// All six share one failure domain: `FontSetBuilder` releases whatever
// it already holds, newest first, when it is dropped unfinished.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{ResourceFile, ResourceLoader};
use crate::core::error::{InitError, ResourceError};
use crate::core::paths::SearchPathList;

//=== Constants ===========================================================

pub const PANEL_FILE: &str = "PANEL.000";

/// Decoded size of the panel image.
pub const PANEL_BLOCK_SIZE: usize = 46272;

/// Panel image row width in pixels.
pub const PANEL_WIDTH: usize = 320;

const PANEL_BIG_FONT_ROW: usize = 40;
const PANEL_SMALL_FONT_ROW: usize = 48;
const PANEL_BIG_FONT_HEIGHT: usize = 8;
const PANEL_SMALL_FONT_HEIGHT: usize = 7;
const PANEL_GLYPH_WIDTH: usize = 8;

//=== FontSlot ============================================================

/// Identifies one of the six shared fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSlot {
    PanelBig,
    PanelSmall,
    Main,
    Big,
    Tiny,
    Menu,
}

impl FontSlot {
    /// Construction order.
    pub const ALL: [FontSlot; 6] = [
        Self::PanelBig,
        Self::PanelSmall,
        Self::Main,
        Self::Big,
        Self::Tiny,
        Self::Menu,
    ];

    /// Resource name for fonts loaded from their own file.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            Self::PanelBig | Self::PanelSmall => None,
            Self::Main => Some("FONT2.0FN"),
            Self::Big => Some("FONTBIG.0FN"),
            Self::Tiny => Some("FONTINY.0FN"),
            Self::Menu => Some("FONTMN1.0FN"),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

//=== PanelImage ==========================================================

/// Decoded panel pixels; lives only until both panel fonts are cut.
pub struct PanelImage {
    pixels: Vec<u8>,
}

impl PanelImage {
    pub fn load(loader: &dyn ResourceLoader, paths: &SearchPathList) -> Result<Self, ResourceError> {
        let mut file = loader.open(paths, PANEL_FILE)?;
        Ok(Self::decode(&mut file))
    }

    pub fn decode(file: &mut ResourceFile) -> Self {
        Self {
            pixels: file.load_fixed_block(PANEL_BLOCK_SIZE),
        }
    }

    /// Glyph strip for the large panel font.
    pub fn big_font_strip(&self) -> &[u8] {
        self.rows(PANEL_BIG_FONT_ROW, PANEL_BIG_FONT_HEIGHT)
    }

    /// Glyph strip for the small panel font.
    pub fn small_font_strip(&self) -> &[u8] {
        self.rows(PANEL_SMALL_FONT_ROW, PANEL_SMALL_FONT_HEIGHT)
    }

    fn rows(&self, first: usize, count: usize) -> &[u8] {
        let start = (first * PANEL_WIDTH).min(self.pixels.len());
        let end = ((first + count) * PANEL_WIDTH).min(self.pixels.len());
        &self.pixels[start..end]
    }
}

impl Drop for PanelImage {
    fn drop(&mut self) {
        trace!(target: "resources", "Panel pixels released");

        #[cfg(test)]
        crate::testing::record("release panel pixels");
    }
}

//=== Font ================================================================

enum Glyphs {
    /// Fixed-width glyphs cut from a panel strip, row-major per glyph.
    Strip { glyph_width: usize, pixels: Vec<Vec<u8>> },

    /// Glyph data as stored in its own font file.
    Encoded(Vec<u8>),
}

/// One loaded font.
pub struct Font {
    slot: FontSlot,
    line_height: Option<usize>,
    glyphs: Glyphs,
}

impl Font {
    //--- from_panel() -----------------------------------------------------
    //
    // Cuts fixed-width glyphs out of a panel strip. A strip that is short
    // or entirely blank means the panel block was truncated.
    //
    pub fn from_panel(slot: FontSlot, strip: &[u8], big: bool) -> Result<Self, ResourceError> {
        let height = if big { PANEL_BIG_FONT_HEIGHT } else { PANEL_SMALL_FONT_HEIGHT };
        let malformed = |reason: &str| ResourceError::Data {
            name: format!("{PANEL_FILE} ({slot:?})"),
            reason: reason.to_string(),
        };

        if strip.len() < height * PANEL_WIDTH {
            return Err(malformed("glyph strip is truncated"));
        }
        if strip.iter().all(|&pixel| pixel == 0) {
            return Err(malformed("glyph strip is blank"));
        }

        let glyph_count = PANEL_WIDTH / PANEL_GLYPH_WIDTH;
        let pixels = (0..glyph_count)
            .map(|glyph| {
                (0..height)
                    .flat_map(|row| {
                        let start = row * PANEL_WIDTH + glyph * PANEL_GLYPH_WIDTH;
                        strip[start..start + PANEL_GLYPH_WIDTH].iter().copied()
                    })
                    .collect()
            })
            .collect();

        Ok(Self::new(
            slot,
            Some(height),
            Glyphs::Strip {
                glyph_width: PANEL_GLYPH_WIDTH,
                pixels,
            },
        ))
    }

    /// Takes ownership of a font file's glyph data.
    pub fn load(slot: FontSlot, mut file: ResourceFile) -> Result<Self, ResourceError> {
        let data = file.read_rest();
        if data.is_empty() {
            return Err(ResourceError::Data {
                name: file.name().to_string(),
                reason: "font file is empty".to_string(),
            });
        }

        Ok(Self::new(slot, None, Glyphs::Encoded(data)))
    }

    fn new(slot: FontSlot, line_height: Option<usize>, glyphs: Glyphs) -> Self {
        trace!(target: "resources", "Font {:?} constructed", slot);
        Self {
            slot,
            line_height,
            glyphs,
        }
    }

    pub fn slot(&self) -> FontSlot {
        self.slot
    }

    /// Known only for panel fonts; file fonts carry it in their encoding.
    pub fn line_height(&self) -> Option<usize> {
        self.line_height
    }

    /// Number of glyphs cut from a panel strip, or `None` for file fonts.
    pub fn glyph_count(&self) -> Option<usize> {
        match &self.glyphs {
            Glyphs::Strip { pixels, .. } => Some(pixels.len()),
            Glyphs::Encoded(_) => None,
        }
    }

    /// Pixels of one panel glyph, `glyph_width × line_height`.
    pub fn glyph(&self, index: usize) -> Option<&[u8]> {
        match &self.glyphs {
            Glyphs::Strip { pixels, .. } => pixels.get(index).map(Vec::as_slice),
            Glyphs::Encoded(_) => None,
        }
    }

    pub fn glyph_width(&self) -> Option<usize> {
        match &self.glyphs {
            Glyphs::Strip { glyph_width, .. } => Some(*glyph_width),
            Glyphs::Encoded(_) => None,
        }
    }

    /// Raw data of a file font.
    pub fn encoded(&self) -> Option<&[u8]> {
        match &self.glyphs {
            Glyphs::Encoded(data) => Some(data),
            Glyphs::Strip { .. } => None,
        }
    }
}

impl Drop for Font {
    fn drop(&mut self) {
        trace!(target: "resources", "Font {:?} released", self.slot);

        #[cfg(test)]
        crate::testing::record(format!("release font {:?}", self.slot));
    }
}

//=== FontSet =============================================================

/// The six shared fonts, indexed by slot. Dropped newest first.
pub struct FontSet {
    fonts: Vec<Font>,
}

impl FontSet {
    pub fn get(&self, slot: FontSlot) -> &Font {
        &self.fonts[slot.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Font> {
        self.fonts.iter()
    }
}

impl Drop for FontSet {
    fn drop(&mut self) {
        while let Some(font) = self.fonts.pop() {
            drop(font);
        }
    }
}

//=== FontSetBuilder ======================================================

/// Accumulates fonts in slot order; releases them in reverse if dropped
/// before `finish()`.
struct FontSetBuilder {
    fonts: Vec<Font>,
}

impl FontSetBuilder {
    fn new() -> Self {
        Self {
            fonts: Vec::with_capacity(FontSlot::ALL.len()),
        }
    }

    fn push(&mut self, font: Font) {
        debug_assert_eq!(font.slot().index(), self.fonts.len());
        self.fonts.push(font);
    }

    fn finish(mut self) -> FontSet {
        FontSet {
            fonts: std::mem::take(&mut self.fonts),
        }
    }
}

impl Drop for FontSetBuilder {
    fn drop(&mut self) {
        if !self.fonts.is_empty() {
            debug!(target: "resources", "Releasing {} partially built fonts", self.fonts.len());
        }
        while let Some(font) = self.fonts.pop() {
            drop(font);
        }
    }
}

//=== load_fonts() ========================================================

/// Builds all six fonts or none of them.
pub fn load_fonts(loader: &dyn ResourceLoader, paths: &SearchPathList) -> Result<FontSet, InitError> {
    let panel = PanelImage::load(loader, paths).map_err(|e| InitError::resource(PANEL_FILE, e))?;
    let mut builder = FontSetBuilder::new();

    builder.push(
        Font::from_panel(FontSlot::PanelBig, panel.big_font_strip(), true)
            .map_err(|e| InitError::resource(PANEL_FILE, e))?,
    );
    builder.push(
        Font::from_panel(FontSlot::PanelSmall, panel.small_font_strip(), false)
            .map_err(|e| InitError::resource(PANEL_FILE, e))?,
    );
    drop(panel);

    for slot in FontSlot::ALL {
        let Some(name) = slot.file_name() else { continue };

        let file = loader.open(paths, name).map_err(|e| InitError::resource(name, e))?;
        builder.push(Font::load(slot, file).map_err(|e| InitError::resource(name, e))?);
    }

    debug!(target: "resources", "Loaded {} fonts", FontSlot::ALL.len());
    Ok(builder.finish())
}

//=========================================================================
// Unit Tests
//=========================================================================
