//! Force-directed layout. The solver owns only simulation parameters and
//! annealing state; positions and velocities live on the graph's nodes, so
//! a paused run resumes exactly where it stopped.

use emath::Vec2;

use crate::model::{Graph, NodeId};

mod forces;

use forces::{attraction_along, repulsion_between};

/// Tunable simulation constants. Defaults match the reference calibration.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    /// Coulomb constant for pairwise repulsion.
    pub repulsion: f32,
    /// Spring constant for edge attraction.
    pub attraction: f32,
    /// Per-step velocity decay, < 1 so the simulation converges.
    pub damping: f32,
    /// Repulsion distance floor, keeps close pairs from exploding.
    pub min_distance: f32,
    /// Speed cap per step.
    pub max_velocity: f32,
    /// Step budget for one [`ForceDirectedLayout::run`] call.
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            repulsion: 15_000.0,
            attraction: 0.04,
            damping: 0.85,
            min_distance: 80.0,
            max_velocity: 50.0,
            iterations: 150,
        }
    }
}

const CENTER_PULL: f32 = 0.1;
const COOLING_RATE: f32 = 0.999;
const TEMPERATURE_FLOOR: f32 = 0.01;

/// Iterative spring/repulsion solver over the graph's node positions.
pub struct ForceDirectedLayout {
    pub config: LayoutConfig,
    running: bool,
    temperature: f32,
}

impl Default for ForceDirectedLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl ForceDirectedLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            running: true,
            temperature: 1.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resumes stepping; the annealing temperature is restored so a
    /// resumed layout can still move.
    pub fn start(&mut self) {
        self.running = true;
        self.temperature = 1.0;
    }

    /// Cooperative stop, honored between steps. Node positions and
    /// velocities are left untouched.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Zeroes every node velocity and restores the temperature.
    pub fn reset(&mut self, graph: &mut Graph) {
        self.temperature = 1.0;
        for id in graph.sorted_ids() {
            if let Some(node) = graph.node_mut(id) {
                node.vel = Vec2::ZERO;
            }
        }
    }

    /// Warms a settled layout back up so it can re-organize after a
    /// topology change.
    pub fn reheat(&mut self) {
        self.temperature = (self.temperature + 0.3).min(1.0);
    }

    /// Runs up to the configured iteration budget, checking the stop flag
    /// between steps. Returns the number of steps executed.
    pub fn run(&mut self, graph: &mut Graph) -> usize {
        let mut executed = 0;
        for _ in 0..self.config.iterations {
            if !self.running {
                break;
            }
            self.step(graph);
            executed += 1;
        }
        log::debug!(
            "layout ran {executed} steps, temperature {:.3}",
            self.temperature
        );
        executed
    }

    /// One simulation step: accumulate pairwise repulsion, per-edge spring
    /// attraction, and a weak centering pull; integrate forces into damped,
    /// speed-capped velocities; integrate velocities into positions scaled
    /// by the cooling temperature.
    pub fn step(&mut self, graph: &mut Graph) {
        let ids = graph.sorted_ids();
        if ids.is_empty() {
            return;
        }

        let positions = ids
            .iter()
            .map(|&id| graph.node(id).map(|node| node.pos).unwrap_or_default())
            .collect::<Vec<_>>();
        let mut forces = vec![Vec2::ZERO; ids.len()];

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let push = repulsion_between(
                    positions[i],
                    positions[j],
                    i,
                    j,
                    self.config.repulsion,
                    self.config.min_distance,
                );
                forces[i] += push;
                forces[j] -= push;
            }
        }

        let index_of = |id: NodeId| ids.binary_search(&id).ok();
        for edge in graph.edges() {
            let (Some(i), Some(j)) = (index_of(edge.source), index_of(edge.target)) else {
                continue;
            };
            let pull = attraction_along(
                positions[i],
                positions[j],
                self.config.attraction,
                edge.weight,
            );
            forces[i] += pull;
            forces[j] -= pull;
        }

        let mut centroid = Vec2::ZERO;
        for position in &positions {
            centroid += position.to_vec2();
        }
        centroid /= positions.len() as f32;
        for (index, position) in positions.iter().enumerate() {
            let toward_center = centroid - position.to_vec2();
            let distance = toward_center.length();
            if distance > 0.0001 {
                forces[index] += (toward_center / distance) * (CENTER_PULL * self.temperature);
            }
        }

        for (index, &id) in ids.iter().enumerate() {
            let Some(node) = graph.node_mut(id) else {
                continue;
            };

            let mut velocity = (node.vel + forces[index]) * self.config.damping;
            let speed = velocity.length();
            if speed > self.config.max_velocity {
                velocity *= self.config.max_velocity / speed;
            }

            node.vel = velocity;
            node.pos += velocity * self.temperature;
        }

        self.temperature = (self.temperature * COOLING_RATE).max(TEMPERATURE_FLOOR);
    }
}
