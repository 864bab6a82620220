/// Colour stored on a particle.
///
/// Fire trail and crystal shard particles carry a `Deferred` colour: their
/// draw routines supply the alpha per pass (glow vs core), so the stored hue
/// has no alpha of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleColor {
    Hsla(Hsl, f32),
    Hex(&'static str),
    Deferred(Hsl),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    /// Saturation in percent.
    pub s: f32,
    /// Lightness in percent.
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn css(self, alpha: f32) -> String {
        format!(
            "hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
            self.h.rem_euclid(360.0),
            self.s,
            self.l,
            alpha.clamp(0.0, 1.0)
        )
    }
}

impl ParticleColor {
    /// CSS colour for routines that paint the stored colour as-is.
    /// A deferred colour completes at full opacity.
    pub fn css(&self) -> String {
        match *self {
            ParticleColor::Hsla(hsl, a) => hsl.css(a),
            ParticleColor::Hex(hex) => hex.to_string(),
            ParticleColor::Deferred(hsl) => hsl.css(1.0),
        }
    }

    /// CSS colour with a draw-time alpha. Deferred colours take `alpha`
    /// directly; complete colours scale their own alpha by it.
    pub fn css_with_alpha(&self, alpha: f32) -> String {
        match *self {
            ParticleColor::Hsla(hsl, a) => hsl.css(a * alpha),
            ParticleColor::Hex(hex) => match hex_rgb(hex) {
                Some([r, g, b]) => format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0)),
                None => hex.to_string(),
            },
            ParticleColor::Deferred(hsl) => hsl.css(alpha),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, ParticleColor::Deferred(_))
    }
}

/// Parses `#rgb` / `#rrggbb`.
fn hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    let nib = |c: char| c.to_digit(16).map(|d| d as u8);
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (o, c) in out.iter_mut().zip(digits.chars()) {
                let d = nib(c)?;
                *o = d * 17;
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, o) in out.iter_mut().enumerate() {
                *o = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}
