use std::fmt;

use glam::DVec2;
use palette::FromColor;
use palette::Hsl;
use palette::Srgb;

use crate::settings::Settings;
use crate::sim::Sim;

/// A colour with a separate opacity, as understood by a 2D canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Rgba {
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32, alpha: f64) -> Self {
        let hsl: Hsl = Hsl::new(hue, saturation, lightness);
        let rgb: Srgb = Srgb::from_color(hsl);
        let rgb: Srgb<u8> = rgb.into_format();

        Self {
            red: rgb.red,
            green: rgb.green,
            blue: rgb.blue,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Formats as a CSS colour, e.g. `rgba(51, 153, 255, 0.5)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// Something particles can be drawn onto.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba);
}

fn base_color(settings: &Settings) -> Rgba {
    Rgba::from_hsl(settings.hue, settings.saturation, settings.lightness, 1.0)
}

/// Draws a frame: the particles first, then the links between them.
pub fn render<S: Surface + ?Sized>(sim: &Sim, surface: &mut S) {
    let color = base_color(&sim.settings);

    surface.clear(sim.width(), sim.height());

    for p in &sim.particles {
        surface.fill_circle(p.pos, p.size, color.with_alpha(p.opacity));
    }

    for link in sim.links() {
        surface.stroke_line(
            sim.particles[link.a].pos,
            sim.particles[link.b].pos,
            color.with_alpha(link.opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::dvec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::particle::Particle;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(f64, f64),
        Circle(DVec2, f64, Rgba),
        Line(DVec2, DVec2, Rgba),
    }

    #[derive(Default)]
    struct Recording(Vec<Op>);

    impl Surface for Recording {
        fn clear(&mut self, width: f64, height: f64) {
            self.0.push(Op::Clear(width, height));
        }

        fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
            self.0.push(Op::Circle(center, radius, color));
        }

        fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba) {
            self.0.push(Op::Line(from, to, color));
        }
    }

    #[test]
    fn default_colour_is_sky_blue() {
        let color = base_color(&Settings::ambient());
        assert_eq!((color.red, color.green, color.blue), (51, 153, 255));
        assert_eq!(color.with_alpha(0.5).to_string(), "rgba(51, 153, 255, 0.5)");
    }

    #[test]
    fn alpha_is_clamped() {
        let color = Rgba::from_hsl(0.0, 0.0, 0.0, 2.0);
        assert_eq!(color.alpha, 1.0);
        assert_eq!(color.with_alpha(-1.0).alpha, 0.0);
    }

    #[test]
    fn frame_is_cleared_then_drawn() {
        let mut sim = Sim::new(
            Settings::ambient(),
            800.0,
            600.0,
            &mut StdRng::seed_from_u64(1),
        );
        sim.particles = vec![
            Particle {
                pos: dvec2(10.0, 10.0),
                vel: DVec2::ZERO,
                size: 2.5,
                opacity: 0.4,
            },
            Particle {
                pos: dvec2(70.0, 10.0),
                vel: DVec2::ZERO,
                size: 1.0,
                opacity: 0.3,
            },
            Particle {
                pos: dvec2(700.0, 500.0),
                vel: DVec2::ZERO,
                size: 1.0,
                opacity: 0.3,
            },
        ];

        let mut surface = Recording::default();
        render(&sim, &mut surface);

        let blue = base_color(&sim.settings);
        assert_eq!(surface.0.len(), 5);
        assert_eq!(surface.0[0], Op::Clear(800.0, 600.0));
        assert_eq!(
            surface.0[1],
            Op::Circle(dvec2(10.0, 10.0), 2.5, blue.with_alpha(0.4))
        );
        match surface.0[4] {
            Op::Line(from, to, color) => {
                assert_eq!((from, to), (dvec2(10.0, 10.0), dvec2(70.0, 10.0)));
                assert!((color.alpha - 0.05).abs() < 1e-12);
            }
            ref op => panic!("expected a line, got {:?}", op),
        }
    }

    #[test]
    fn empty_surface_only_clears() {
        let sim = Sim::new(Settings::ambient(), 50.0, 50.0, &mut StdRng::seed_from_u64(1));
        let mut surface = Recording::default();
        render(&sim, &mut surface);
        assert_eq!(surface.0, vec![Op::Clear(50.0, 50.0)]);
    }
}
