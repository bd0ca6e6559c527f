//=========================================================================
// Palette Effects
//=========================================================================
//
// Time-driven transformations applied to the palette at presentation.
//
// Effects advance by elapsed ticks, never by frame count, so a fade
// takes the same wall time at 30 or 50 frames per second.
//
//=========================================================================

//=== Rgb / Palette =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn scaled(self, numerator: u32, denominator: u32) -> Self {
        let scale = |c: u8| ((c as u32 * numerator) / denominator) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// 256-entry indexed palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 256],
}

impl Palette {
    pub fn black() -> Self {
        Self {
            colors: [Rgb::default(); 256],
        }
    }

    /// Linear grey ramp; used until a stage installs its own palette.
    pub fn greyscale() -> Self {
        let mut palette = Self::black();
        for (index, color) in palette.colors.iter_mut().enumerate() {
            let level = index as u8;
            *color = Rgb::new(level, level, level);
        }
        palette
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    pub fn set(&mut self, index: u8, color: Rgb) {
        self.colors[index as usize] = color;
    }

    pub fn colors(&self) -> &[Rgb; 256] {
        &self.colors
    }

    fn scale(&mut self, numerator: u32, denominator: u32) {
        for color in &mut self.colors {
            *color = color.scaled(numerator, denominator);
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::greyscale()
    }
}

//=== PaletteEffect =======================================================

/// Transformation applied to the shown palette on every flip.
pub trait PaletteEffect {
    /// Advances the effect by `delta_ticks` and applies it to `palette`.
    fn apply(&mut self, palette: &mut Palette, delta_ticks: u32);

    /// Whether the effect has reached its end state.
    fn is_finished(&self) -> bool {
        false
    }
}

//=== Fade ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// From black to the full palette.
    In,

    /// From the full palette to black.
    Out,
}

/// Linear fade over a fixed number of ticks.
#[derive(Debug, Clone)]
pub struct Fade {
    direction: FadeDirection,
    duration: u32,
    elapsed: u32,
}

impl Fade {
    pub fn new(direction: FadeDirection, duration_ticks: u32) -> Self {
        Self {
            direction,
            duration: duration_ticks.max(1),
            elapsed: 0,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Brightness in 0..=duration, where `duration` is full brightness.
    fn brightness(&self) -> u32 {
        match self.direction {
            FadeDirection::In => self.elapsed,
            FadeDirection::Out => self.duration - self.elapsed,
        }
    }
}

impl PaletteEffect for Fade {
    fn apply(&mut self, palette: &mut Palette, delta_ticks: u32) {
        self.elapsed = self.elapsed.saturating_add(delta_ticks).min(self.duration);
        palette.scale(self.brightness(), self.duration);
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

//=== EffectChain =========================================================

/// Applies several effects in order.
#[derive(Default)]
pub struct EffectChain {
    effects: Vec<Box<dyn PaletteEffect>>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, effect: impl PaletteEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }
}

impl PaletteEffect for EffectChain {
    fn apply(&mut self, palette: &mut Palette, delta_ticks: u32) {
        for effect in &mut self.effects {
            effect.apply(palette, delta_ticks);
        }
    }

    fn is_finished(&self) -> bool {
        self.effects.iter().all(|effect| effect.is_finished())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_in_progresses_with_ticks_not_calls() {
        let mut fade = Fade::new(FadeDirection::In, 100);

        let mut palette = Palette::greyscale();
        fade.apply(&mut palette, 50);
        assert_eq!(palette.get(200), Rgb::new(100, 100, 100));

        // Two short frames cover the same time as one long one.
        let mut fade_a = Fade::new(FadeDirection::In, 100);
        let mut fade_b = Fade::new(FadeDirection::In, 100);
        let (mut pa, mut pb) = (Palette::greyscale(), Palette::greyscale());
        fade_a.apply(&mut Palette::greyscale(), 20);
        fade_a.apply(&mut pa, 20);
        fade_b.apply(&mut pb, 40);
        assert_eq!(pa, pb);
    }

    #[test]
    fn fade_out_ends_black_and_finished() {
        let mut fade = Fade::new(FadeDirection::Out, 60);
        let mut palette = Palette::greyscale();

        fade.apply(&mut palette, 1000);
        assert!(fade.is_finished());
        assert_eq!(palette, Palette::black());
    }

    #[test]
    fn chain_applies_every_effect() {
        let mut chain = EffectChain::new()
            .with(Fade::new(FadeDirection::In, 10))
            .with(Fade::new(FadeDirection::Out, 10));
        let mut palette = Palette::greyscale();

        chain.apply(&mut palette, 10);
        assert!(chain.is_finished());
        assert_eq!(palette, Palette::black());
    }
}
