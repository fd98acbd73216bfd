//! Force-directed layout engine.
//!
//! Bodies live in an index-addressed arena parallel to the node list built by
//! [`super::state::GraphState`]. Only two writers touch body positions: the
//! simulation step and the drag handlers (through [`Simulation::pin`] and
//! [`Simulation::release`]). The renderer only reads.
//!
//! Each tick applies, in order:
//! - link attraction towards `link_distance`
//! - many-body charge (brute force, pairs)
//! - centering of the free-node centroid
//! - collision avoidance between circles of `collision_radius`
//!
//! then integrates velocities with decay. Energy (`alpha`) moves towards
//! `alpha_target` every tick and scales link and charge forces; the engine is
//! idle once both are below `alpha_min`.

use super::config::SimulationConfig;

/// Mutable simulation record for one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
	/// World position.
	pub x: f64,
	/// World position.
	pub y: f64,
	/// Velocity carried into the next tick.
	pub vx: f64,
	/// Velocity carried into the next tick.
	pub vy: f64,
	/// Fixed position while the user drags the node.
	pub pinned: Option<(f64, f64)>,
}

#[derive(Clone, Debug)]
struct Link {
	source: usize,
	target: usize,
	/// Share of the correction applied to the target.
	bias: f64,
	strength: f64,
}

/// Minimal linear congruential generator used to separate coincident bodies
/// deterministically.
#[derive(Clone, Debug)]
struct Lcg(u32);

impl Lcg {
	fn next(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		self.0 as f64 / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Layout state for one graph: bodies, links and energy.
pub struct Simulation {
	bodies: Vec<Body>,
	links: Vec<Link>,
	config: SimulationConfig,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	random: Lcg,
}

impl Simulation {
	/// Seeds `node_count` bodies on a sunflower spiral around `center` and
	/// registers the links. Links naming out-of-range or identical indices are
	/// ignored.
	pub fn new(
		node_count: usize,
		links: &[(usize, usize)],
		center: (f64, f64),
		config: SimulationConfig,
	) -> Self {
		let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
		let bodies = (0..node_count)
			.map(|i| {
				let radius = 10.0 * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden_angle;
				Body {
					x: center.0 + radius * angle.cos(),
					y: center.1 + radius * angle.sin(),
					..Body::default()
				}
			})
			.collect();

		let mut degree = vec![0usize; node_count];
		let valid: Vec<(usize, usize)> = links
			.iter()
			.copied()
			.filter(|&(s, t)| s != t && s < node_count && t < node_count)
			.collect();
		for &(s, t) in &valid {
			degree[s] += 1;
			degree[t] += 1;
		}
		let links = valid
			.into_iter()
			.map(|(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Link {
					source,
					target,
					bias: ds / (ds + dt),
					strength: 1.0 / ds.min(dt),
				}
			})
			.collect();

		Self {
			bodies,
			links,
			alpha: config.alpha_start,
			alpha_target: 0.0,
			config,
			center,
			random: Lcg(1),
		}
	}

	/// All bodies in node order.
	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	/// Body for a node index.
	pub fn body(&self, idx: usize) -> Option<&Body> {
		self.bodies.get(idx)
	}

	/// Current position of a node.
	pub fn position(&self, idx: usize) -> Option<(f64, f64)> {
		self.bodies.get(idx).map(|b| (b.x, b.y))
	}

	/// Current energy.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Energy the simulation is moving towards.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Centering target in world units.
	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	/// Parameters in use.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// True when there is nothing left to move.
	pub fn is_idle(&self) -> bool {
		self.bodies.is_empty()
			|| (self.alpha < self.config.alpha_min && self.alpha_target < self.config.alpha_min)
	}

	/// Advances one tick unless idle. Returns whether positions changed.
	pub fn step(&mut self) -> bool {
		if self.is_idle() {
			return false;
		}
		self.tick();
		true
	}

	/// Raises the energy to at least `alpha` so the layout resumes.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
	}

	/// Moves the centering target, e.g. after a viewport resize.
	pub fn set_center(&mut self, center: (f64, f64)) {
		self.center = center;
		self.reheat(self.config.resize_alpha);
	}

	/// Pins a body at `(x, y)`, moving it there immediately, and keeps the
	/// simulation warm while the pin is held.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		let Some(body) = self.bodies.get_mut(idx) else {
			return;
		};
		body.pinned = Some((x, y));
		body.x = x;
		body.y = y;
		body.vx = 0.0;
		body.vy = 0.0;
		self.alpha_target = self.config.drag_alpha_target;
	}

	/// Releases a pin. The body continues from where it was pinned and the
	/// energy decays back to zero.
	pub fn release(&mut self, idx: usize) {
		if let Some(body) = self.bodies.get_mut(idx) {
			body.pinned = None;
		}
		if self.bodies.iter().all(|b| b.pinned.is_none()) {
			self.alpha_target = 0.0;
		}
	}

	/// One simulation tick, regardless of energy.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_collision();

		let decay = 1.0 - self.config.velocity_decay;
		for body in &mut self.bodies {
			match body.pinned {
				Some((fx, fy)) => {
					body.x = fx;
					body.y = fy;
					body.vx = 0.0;
					body.vy = 0.0;
				}
				None => {
					body.vx *= decay;
					body.vy *= decay;
					body.x += body.vx;
					body.y += body.vy;
				}
			}
		}
	}

	fn apply_links(&mut self) {
		let (alpha, distance) = (self.alpha, self.config.link_distance);
		for link in &self.links {
			let (s, t) = (&self.bodies[link.source], &self.bodies[link.target]);
			let mut dx = t.x + t.vx - s.x - s.vx;
			let mut dy = t.y + t.vy - s.y - s.vy;
			if dx == 0.0 {
				dx = self.random.jiggle();
			}
			if dy == 0.0 {
				dy = self.random.jiggle();
			}
			let len = (dx * dx + dy * dy).sqrt();
			let k = (len - distance) / len * alpha * link.strength;
			let (dx, dy) = (dx * k, dy * k);

			let t = &mut self.bodies[link.target];
			t.vx -= dx * link.bias;
			t.vy -= dy * link.bias;
			let s = &mut self.bodies[link.source];
			s.vx += dx * (1.0 - link.bias);
			s.vy += dy * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let n = self.bodies.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut dx = self.bodies[j].x - self.bodies[i].x;
				let mut dy = self.bodies[j].y - self.bodies[i].y;
				if dx == 0.0 {
					dx = self.random.jiggle();
				}
				if dy == 0.0 {
					dy = self.random.jiggle();
				}
				let mut l2 = dx * dx + dy * dy;
				// Soften very close pairs instead of dividing by ~0.
				if l2 < 1.0 {
					l2 = l2.sqrt();
				}
				let (fx, fy) = (dx * strength / l2, dy * strength / l2);
				self.bodies[i].vx += fx;
				self.bodies[i].vy += fy;
				self.bodies[j].vx -= fx;
				self.bodies[j].vy -= fy;
			}
		}
	}

	fn apply_center(&mut self) {
		let strength = self.config.center_strength;
		let (mut sx, mut sy, mut free) = (0.0, 0.0, 0usize);
		for body in self.bodies.iter().filter(|b| b.pinned.is_none()) {
			sx += body.x;
			sy += body.y;
			free += 1;
		}
		if free == 0 {
			return;
		}
		let shift_x = (self.center.0 - sx / free as f64) * strength;
		let shift_y = (self.center.1 - sy / free as f64) * strength;
		for body in self.bodies.iter_mut().filter(|b| b.pinned.is_none()) {
			body.x += shift_x;
			body.y += shift_y;
		}
	}

	fn apply_collision(&mut self) {
		let radius = self.config.collision_radius;
		let min_dist = radius * 2.0;
		let strength = self.config.collision_strength;
		let n = self.bodies.len();
		for i in 0..n {
			let xi = self.bodies[i].x + self.bodies[i].vx;
			let yi = self.bodies[i].y + self.bodies[i].vy;
			for j in (i + 1)..n {
				let mut dx = xi - (self.bodies[j].x + self.bodies[j].vx);
				let mut dy = yi - (self.bodies[j].y + self.bodies[j].vy);
				let mut l2 = dx * dx + dy * dy;
				if l2 >= min_dist * min_dist {
					continue;
				}
				if dx == 0.0 {
					dx = self.random.jiggle();
					l2 += dx * dx;
				}
				if dy == 0.0 {
					dy = self.random.jiggle();
					l2 += dy * dy;
				}
				let len = l2.sqrt();
				let k = (min_dist - len) / len * strength;
				let (dx, dy) = (dx * k, dy * k);
				// Equal radii: each body takes half the correction.
				self.bodies[i].vx += dx * 0.5;
				self.bodies[i].vy += dy * 0.5;
				self.bodies[j].vx -= dx * 0.5;
				self.bodies[j].vy -= dy * 0.5;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
		((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
	}

	fn settle(sim: &mut Simulation) -> usize {
		let mut ticks = 0;
		while sim.step() {
			ticks += 1;
			assert!(ticks < 2000, "simulation never settled");
		}
		ticks
	}

	#[test]
	fn test_empty_simulation_is_idle() {
		let mut sim = Simulation::new(0, &[], (400.0, 300.0), SimulationConfig::default());
		assert!(sim.is_idle());
		assert!(!sim.step());
		assert!(sim.bodies().is_empty());
	}

	#[test]
	fn test_settles_with_alpha_below_min() {
		let mut sim = Simulation::new(3, &[(0, 1)], (400.0, 300.0), SimulationConfig::default());
		let ticks = settle(&mut sim);
		assert!((250..=350).contains(&ticks), "took {ticks} ticks");
		assert!(sim.alpha() < sim.config().alpha_min);
	}

	#[test]
	fn test_settled_nodes_do_not_overlap() {
		let links: Vec<(usize, usize)> = (1..12).map(|i| (0, i)).collect();
		let mut sim = Simulation::new(12, &links, (400.0, 300.0), SimulationConfig::default());
		settle(&mut sim);
		let bodies = sim.bodies();
		for i in 0..bodies.len() {
			for j in (i + 1)..bodies.len() {
				let d = distance((bodies[i].x, bodies[i].y), (bodies[j].x, bodies[j].y));
				assert!(d >= 64.0, "nodes {i} and {j} overlap at distance {d}");
			}
		}
	}

	#[test]
	fn test_linked_pair_near_link_distance() {
		let mut sim = Simulation::new(2, &[(0, 1)], (0.0, 0.0), SimulationConfig::default());
		settle(&mut sim);
		let d = distance(sim.position(0).unwrap(), sim.position(1).unwrap());
		assert!(d > 90.0 && d < 140.0, "distance {d}");
	}

	#[test]
	fn test_centroid_moves_to_center() {
		let mut sim = Simulation::new(4, &[(0, 1), (2, 3)], (500.0, 250.0), SimulationConfig::default());
		sim.bodies[0].x += 300.0;
		settle(&mut sim);
		let n = sim.bodies().len() as f64;
		let cx = sim.bodies().iter().map(|b| b.x).sum::<f64>() / n;
		let cy = sim.bodies().iter().map(|b| b.y).sum::<f64>() / n;
		assert!((cx - 500.0).abs() < 5.0, "cx {cx}");
		assert!((cy - 250.0).abs() < 5.0, "cy {cy}");
	}

	#[test]
	fn test_coincident_bodies_separate_without_nan() {
		let mut sim = Simulation::new(3, &[(0, 1)], (0.0, 0.0), SimulationConfig::default());
		for body in &mut sim.bodies {
			body.x = 10.0;
			body.y = 10.0;
		}
		for _ in 0..50 {
			sim.tick();
		}
		for body in sim.bodies() {
			assert!(body.x.is_finite() && body.y.is_finite());
		}
		let d = distance(sim.position(0).unwrap(), sim.position(2).unwrap());
		assert!(d > 1.0, "bodies still coincide: {d}");
	}

	#[test]
	fn test_pinned_body_stays_put() {
		let mut sim = Simulation::new(3, &[(0, 1), (1, 2)], (0.0, 0.0), SimulationConfig::default());
		sim.pin(1, 250.0, -40.0);
		assert_eq!(sim.position(1), Some((250.0, -40.0)));
		for _ in 0..20 {
			sim.tick();
			assert_eq!(sim.position(1), Some((250.0, -40.0)));
		}
	}

	#[test]
	fn test_pin_keeps_simulation_running() {
		let mut sim = Simulation::new(2, &[(0, 1)], (0.0, 0.0), SimulationConfig::default());
		settle(&mut sim);
		assert!(sim.is_idle());
		sim.pin(0, 100.0, 100.0);
		assert!(!sim.is_idle());
		assert_eq!(sim.alpha_target(), 0.3);
		sim.release(0);
		assert_eq!(sim.alpha_target(), 0.0);
	}

	#[test]
	fn test_release_continues_from_pin() {
		let mut sim = Simulation::new(3, &[(0, 1), (1, 2)], (0.0, 0.0), SimulationConfig::default());
		settle(&mut sim);
		sim.pin(2, 300.0, 0.0);
		for _ in 0..30 {
			sim.tick();
		}
		sim.release(2);
		let mut previous = (300.0, 0.0);
		for _ in 0..100 {
			sim.tick();
			let now = sim.position(2).unwrap();
			assert!(distance(previous, now) < 30.0, "jumped from {previous:?} to {now:?}");
			previous = now;
		}
	}

	#[test]
	fn test_dragged_node_attracts_neighbor() {
		let mut sim = Simulation::new(2, &[(0, 1)], (0.0, 0.0), SimulationConfig::default());
		settle(&mut sim);
		let target = (400.0, 0.0);
		sim.pin(0, target.0, target.1);
		let start = distance(sim.position(1).unwrap(), target);
		for _ in 0..100 {
			sim.tick();
		}
		let end = distance(sim.position(1).unwrap(), target);
		assert!(end < start - 50.0, "neighbor did not follow: {start} -> {end}");
	}

	#[test]
	fn test_invalid_links_ignored() {
		let mut sim = Simulation::new(2, &[(0, 0), (0, 5)], (0.0, 0.0), SimulationConfig::default());
		assert!(sim.links.is_empty());
		sim.tick();
	}

	#[test]
	fn test_set_center_reheats() {
		let mut sim = Simulation::new(2, &[], (0.0, 0.0), SimulationConfig::default());
		settle(&mut sim);
		sim.set_center((100.0, 100.0));
		assert!(!sim.is_idle());
		assert_eq!(sim.center(), (100.0, 100.0));
	}
}
