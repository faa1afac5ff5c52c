use glam::DVec2;
use rand::Rng;

use crate::particle::Particle;
use crate::settings::Settings;

/// The number of particles a `width` by `height` surface gets.
pub fn particle_count(width: f64, height: f64, settings: &Settings) -> usize {
    if width <= 0.0 || height <= 0.0 {
        return 0;
    }
    (width * height / settings.area_per_particle).floor() as usize
}

/// A line joining two particles which are close enough to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// The state required for the simulation of the particles.
pub struct Sim {
    pub settings: Settings,

    width: f64,
    height: f64,

    /// `None` until the pointer first moves over the page.
    cursor: Option<DVec2>,

    pub particles: Vec<Particle>,
}

impl Sim {
    pub fn new<R: Rng>(settings: Settings, width: f64, height: f64, rng: &mut R) -> Self {
        let mut sim = Self {
            settings,
            width: 0.0,
            height: 0.0,
            cursor: None,
            particles: Vec::new(),
        };
        sim.resize(width, height, rng);
        sim
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn cursor(&self) -> Option<DVec2> {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: DVec2) {
        self.cursor = Some(pos);
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Changes the size of the surface, throwing away every particle and generating a new set to fit.
    pub fn resize<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.regenerate_particles(rng);
    }

    pub fn regenerate_particles<R: Rng>(&mut self, rng: &mut R) {
        let count = particle_count(self.width, self.height, &self.settings);
        self.particles = (0..count)
            .map(|_| Particle::generate(self.width, self.height, &self.settings, rng))
            .collect();
    }

    /// The velocity change the cursor applies to a particle at `pos`.
    pub fn repulsion(&self, pos: DVec2) -> DVec2 {
        let cursor = match self.cursor {
            Some(cursor) => cursor,
            None => return DVec2::ZERO,
        };

        let delta = cursor - pos;
        let dist = delta.length();
        let radius = self.settings.repel_radius;

        // At zero distance there's no direction to push in.
        if dist <= 0.0 || dist >= radius {
            return DVec2::ZERO;
        }

        let force = (radius - dist) / radius;
        -delta / dist * force * self.settings.repel_strength
    }

    /// Advances every particle by one frame.
    ///
    /// There's no time step: particles move by their velocity once per call, however long it's been since the last.
    pub fn step(&mut self) {
        for i in 0..self.particles.len() {
            let vel = self.particles[i].vel;
            self.particles[i].pos += vel;

            let push = self.repulsion(self.particles[i].pos);

            let p = &mut self.particles[i];
            p.vel += push;

            // Positions aren't clamped, so a particle can sit slightly outside for a frame until its new velocity brings it back.
            if !(0.0..self.width).contains(&p.pos.x) {
                p.vel.x *= -1.0;
            }
            if !(0.0..self.height).contains(&p.pos.y) {
                p.vel.y *= -1.0;
            }
        }
    }

    /// Every pair of particles closer together than `link_distance`, each pair once.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max = self.settings.link_distance;
        let max_sq = max * max;

        self.particles.iter().enumerate().flat_map(move |(i, p)| {
            self.particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, q)| {
                    let dist_sq = p.pos.distance_squared(q.pos);
                    if dist_sq >= max_sq {
                        return None;
                    }

                    let dist = dist_sq.sqrt();
                    Some(Link {
                        a: i,
                        b: i + 1 + offset,
                        opacity: self.settings.link_opacity * (1.0 - dist / max),
                    })
                })
        })
    }
}
