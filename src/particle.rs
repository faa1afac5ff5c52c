use glam::dvec2;
use glam::DVec2;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Uniform;

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// Screen space, in pixels.
    pub pos: DVec2,
    /// Pixels per frame.
    pub vel: DVec2,
    /// The radius it's drawn with.
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    /// Generates a particle somewhere inside a `width` by `height` surface.
    ///
    /// Both dimensions must be positive.
    pub fn generate<R: Rng>(width: f64, height: f64, settings: &Settings, rng: &mut R) -> Self {
        let x_dist = Uniform::new(0.0, width);
        let y_dist = Uniform::new(0.0, height);
        let vel_dist = Uniform::new_inclusive(-settings.max_speed, settings.max_speed);
        let size_dist = Uniform::new_inclusive(settings.size_range[0], settings.size_range[1]);
        let opacity_dist =
            Uniform::new_inclusive(settings.opacity_range[0], settings.opacity_range[1]);

        Self {
            pos: dvec2(x_dist.sample(rng), y_dist.sample(rng)),
            vel: dvec2(vel_dist.sample(rng), vel_dist.sample(rng)),
            size: size_dist.sample(rng),
            opacity: opacity_dist.sample(rng),
        }
    }
}
