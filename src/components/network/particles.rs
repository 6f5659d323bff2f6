//! Particle model for the background field.
//!
//! Pure simulation, no DOM. Positions are in CSS pixels; the canvas transform
//! takes care of device pixel scaling.

use std::f64::consts::TAU;

use fastrand::Rng;

use crate::config::FieldConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Fixed at creation.
	pub base_radius: f64,
	/// `base_radius` plus the current pulse offset.
	pub radius: f64,
	/// Pulse phase. Grows without bound, only fed to sin().
	pub pulse: f64,
}

/// Number of particles for a viewport: one per `area_per_particle`, capped.
pub fn particle_count(width: f64, height: f64, config: &FieldConfig) -> usize {
	let area = width.max(0.0) * height.max(0.0);
	let count = (area / config.area_per_particle).floor();
	if !count.is_finite() || count <= 0.0 {
		return 0;
	}
	(count as usize).min(config.max_particles)
}

/// Displacement applied to a particle at `(dx, dy)` from the pointer, where
/// `(dx, dy)` points from the particle toward the pointer.
///
/// Pushes the particle away. Zero at or beyond the repulsion radius, and at
/// exactly zero distance where there is no direction to push in.
pub fn repulsion(dx: f64, dy: f64, config: &FieldConfig) -> (f64, f64) {
	let distance = (dx * dx + dy * dy).sqrt();
	if distance >= config.repulsion_radius || distance <= 0.0 {
		return (0.0, 0.0);
	}
	let force = (config.repulsion_radius - distance) / config.repulsion_radius;
	let push = force * config.repulsion_strength;
	(-(dx / distance) * push, -(dy / distance) * push)
}

/// Line strength in `(0, 1]` for two particles `distance` apart, or `None`
/// when they are too far apart to connect.
pub fn connection_opacity(distance: f64, config: &FieldConfig) -> Option<f64> {
	(distance < config.connection_radius)
		.then(|| (config.connection_radius - distance) / config.connection_radius)
}

/// The animated particle set and the bounds it lives in.
pub struct ParticleField {
	/// Particles in draw order.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	config: FieldConfig,
}

impl ParticleField {
	/// A field filled for the given bounds.
	pub fn new(config: FieldConfig, width: f64, height: f64, rng: &mut Rng) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			width,
			height,
			config,
		};
		field.regenerate(width, height, rng);
		field
	}

	/// Replace every particle with a fresh set sized for the new bounds.
	pub fn regenerate(&mut self, width: f64, height: f64, rng: &mut Rng) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);

		let count = particle_count(self.width, self.height, &self.config);
		let c = &self.config;
		self.particles = (0..count)
			.map(|_| {
				let base_radius = rng.f64() * c.radius_spread + c.radius_min;
				let pulse = rng.f64() * TAU;
				Particle {
					x: rng.f64() * self.width,
					y: rng.f64() * self.height,
					vx: (rng.f64() - 0.5) * c.speed,
					vy: (rng.f64() - 0.5) * c.speed,
					base_radius,
					radius: base_radius + pulse.sin() * c.pulse_amplitude,
					pulse,
				}
			})
			.collect();
	}

	/// Right bound.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Bottom bound.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Tunables the field was built with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Advance particle `idx` by one frame and return it.
	///
	/// Integrates velocity, reflects off the bounds (clamping the position back
	/// inside), advances the pulse, then applies pointer repulsion.
	pub fn advance(&mut self, idx: usize, pointer: (f64, f64)) -> &Particle {
		let (width, height) = (self.width, self.height);
		let c = &self.config;
		let p = &mut self.particles[idx];

		p.x += p.vx;
		p.y += p.vy;

		if p.x < 0.0 || p.x > width {
			p.vx = -p.vx;
		}
		if p.y < 0.0 || p.y > height {
			p.vy = -p.vy;
		}
		p.x = p.x.clamp(0.0, width);
		p.y = p.y.clamp(0.0, height);

		p.pulse += c.pulse_step;
		p.radius = p.base_radius + p.pulse.sin() * c.pulse_amplitude;

		let (px, py) = repulsion(pointer.0 - p.x, pointer.1 - p.y, c);
		p.x += px;
		p.y += py;

		p
	}

	/// Connections from particle `idx` to every later particle in range, as
	/// `(other_index, opacity)`. Each unordered pair is visited once overall.
	pub fn connections_from(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
		let a = &self.particles[idx];
		self.particles
			.iter()
			.enumerate()
			.skip(idx + 1)
			.filter_map(move |(j, b)| {
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				connection_opacity((dx * dx + dy * dy).sqrt(), &self.config).map(|o| (j, o))
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn field(width: f64, height: f64) -> ParticleField {
		ParticleField::new(FieldConfig::default(), width, height, &mut Rng::with_seed(7))
	}

	fn still(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			base_radius: 1.0,
			radius: 1.0,
			pulse: 0.0,
		}
	}

	#[test]
	fn count_follows_area_with_cap() {
		let c = FieldConfig::default();
		assert_eq!(particle_count(1600.0, 900.0, &c), 72);
		assert_eq!(particle_count(1920.0, 1080.0, &c), 80);
		assert_eq!(particle_count(100.0, 100.0, &c), 0);
		assert_eq!(particle_count(0.0, 900.0, &c), 0);
		assert_eq!(particle_count(-50.0, 900.0, &c), 0);
		assert_eq!(particle_count(200.0, 199.0, &c), 1);
	}

	#[test]
	fn count_is_floor_of_area_share() {
		let c = FieldConfig::default();
		for (w, h) in [(320.0, 568.0), (768.0, 1024.0), (1280.0, 720.0), (1366.0, 768.0)] {
			let expected = ((w * h / 20_000.0_f64).floor() as usize).min(80);
			assert_eq!(particle_count(w, h, &c), expected, "{w}x{h}");
		}
	}

	#[test]
	fn regenerated_particles_are_in_bounds() {
		let mut f = field(1600.0, 900.0);
		assert_eq!(f.particles.len(), 72);

		let mut rng = Rng::with_seed(99);
		for (w, h) in [(800.0, 600.0), (375.0, 812.0), (2560.0, 1440.0)] {
			f.regenerate(w, h, &mut rng);
			assert_eq!(f.particles.len(), particle_count(w, h, f.config()));
			for p in &f.particles {
				assert!((0.0..=w).contains(&p.x) && (0.0..=h).contains(&p.y));
				assert!(p.vx.abs() <= 0.15 && p.vy.abs() <= 0.15);
				assert!((0.5..2.0).contains(&p.base_radius));
			}
		}
	}

	#[test]
	fn regenerate_replaces_rather_than_keeps() {
		let mut f = field(1600.0, 900.0);
		let before = f.particles.clone();
		f.regenerate(1600.0, 900.0, &mut Rng::with_seed(8));
		assert_ne!(f.particles, before);
	}

	#[test]
	fn crossing_an_edge_flips_velocity() {
		let mut f = field(100.0, 100.0);
		f.particles = vec![still(99.9, 50.0, 0.2, 0.0), still(50.0, 0.05, 0.0, -0.1)];
		let far = (-1000.0, -1000.0);

		let p = f.advance(0, far).clone();
		assert_eq!(p.vx, -0.2);
		assert_eq!(p.x, 100.0);

		let p = f.advance(1, far).clone();
		assert_eq!(p.vy, 0.1);
		assert_eq!(p.y, 0.0);
	}

	#[test]
	fn staying_inside_keeps_velocity() {
		let mut f = field(100.0, 100.0);
		f.particles = vec![still(50.0, 50.0, 0.1, -0.1)];
		let p = f.advance(0, (-1000.0, -1000.0)).clone();
		assert_eq!((p.vx, p.vy), (0.1, -0.1));
		assert!((p.x - 50.1).abs() < 1e-12 && (p.y - 49.9).abs() < 1e-12);
	}

	#[test]
	fn pulse_advances_and_drives_radius() {
		let mut f = field(100.0, 100.0);
		f.particles = vec![still(50.0, 50.0, 0.0, 0.0)];
		for _ in 0..100 {
			f.advance(0, (-1000.0, -1000.0));
		}
		let p = &f.particles[0];
		assert!((p.pulse - 1.5).abs() < 1e-9);
		assert!((p.radius - (1.0 + 1.5_f64.sin() * 0.3)).abs() < 1e-9);
	}

	#[test]
	fn repulsion_is_zero_outside_radius() {
		let c = FieldConfig::default();
		assert_eq!(repulsion(80.0, 0.0, &c), (0.0, 0.0));
		assert_eq!(repulsion(0.0, 120.0, &c), (0.0, 0.0));
		assert_eq!(repulsion(0.0, 0.0, &c), (0.0, 0.0));
	}

	#[test]
	fn repulsion_grows_as_pointer_approaches() {
		let c = FieldConfig::default();
		let mut last = 0.0;
		for d in [79.0, 60.0, 40.0, 20.0, 5.0, 0.5] {
			let (x, y) = repulsion(d, 0.0, &c);
			let magnitude = (x * x + y * y).sqrt();
			assert!(magnitude > last, "at {d}");
			last = magnitude;
		}
		assert!(last < c.repulsion_strength);
	}

	#[test]
	fn repulsion_pushes_away_from_pointer() {
		let c = FieldConfig::default();
		// Pointer to the right and below: push left and up.
		let (x, y) = repulsion(30.0, 40.0, &c);
		assert!(x < 0.0 && y < 0.0);
		let force = (80.0 - 50.0) / 80.0 * 0.3;
		assert!((x - -0.6 * force).abs() < 1e-12);
		assert!((y - -0.8 * force).abs() < 1e-12);
	}

	#[test]
	fn pointer_nearby_displaces_particle() {
		let mut f = field(200.0, 200.0);
		f.particles = vec![still(100.0, 100.0, 0.0, 0.0)];
		let p = f.advance(0, (110.0, 100.0)).clone();
		assert!(p.x < 100.0);
		assert_eq!(p.y, 100.0);
	}

	#[test]
	fn connection_only_below_radius() {
		let c = FieldConfig::default();
		assert_eq!(connection_opacity(100.0, &c), None);
		assert_eq!(connection_opacity(150.0, &c), None);
		assert_eq!(connection_opacity(0.0, &c), Some(1.0));
		assert_eq!(connection_opacity(75.0, &c), Some(0.25));

		let mut last = f64::INFINITY;
		for d in [0.0, 10.0, 50.0, 90.0, 99.9] {
			let o = connection_opacity(d, &c).unwrap();
			assert!(o < last && o > 0.0);
			last = o;
		}
	}

	#[test]
	fn each_pair_connects_once() {
		let mut f = field(500.0, 500.0);
		f.particles = vec![
			still(0.0, 0.0, 0.0, 0.0),
			still(60.0, 80.0, 0.0, 0.0),  // 100 from #0
			still(30.0, 40.0, 0.0, 0.0),  // 50 from #0 and #1
			still(400.0, 400.0, 0.0, 0.0), // far from all
		];

		let pairs: Vec<(usize, usize)> = (0..f.particles.len())
			.flat_map(|i| f.connections_from(i).map(move |(j, _)| (i, j)).collect::<Vec<_>>())
			.collect();
		assert_eq!(pairs, vec![(0, 2), (1, 2)]);

		let (_, opacity) = f.connections_from(0).next().unwrap();
		assert!((opacity - 0.5).abs() < 1e-12);
	}
}
