//! Windowed aquarium demo -- a seeded school of fish drifting over scattered
//! food.
//!
//! Run with:
//!   cargo run --example aquarium --features renderer -p shoal-viewer
//!
//! Close the window to quit.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use shoal_viewer::prelude::*;
use shoal_viewer::render::{run_windowed, ViewerConfig};

const TARGET_FPS: f64 = 30.0;
const SCHOOL_SIZE: usize = 24;
const FOOD_COUNT: usize = 40;
/// Distance covered per step, in unit-square lengths.
const SWIM_SPEED: f32 = 0.004;
/// Maximum heading change per step, in radians.
const WANDER: f32 = 0.08;

/// Fish glide along their headings with a little random wander, wrapping at
/// the edges; the food never moves.
struct DriftingSchool {
    world: WorldSnapshot,
    rng: Pcg64,
}

impl DriftingSchool {
    fn seeded(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let agents = (0..SCHOOL_SIZE)
            .map(|_| Agent {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                rotation: rng.gen_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        let foods = (0..FOOD_COUNT)
            .map(|_| Food {
                x: rng.gen_range(0.05..0.95),
                y: rng.gen_range(0.05..0.95),
            })
            .collect();
        Self {
            world: WorldSnapshot { agents, foods },
            rng,
        }
    }
}

impl Stepper for DriftingSchool {
    fn step(&mut self) {
        for agent in &mut self.world.agents {
            agent.rotation += self.rng.gen_range(-WANDER..WANDER);
            // Heading r points along (-sin r, cos r) on the y-down surface.
            agent.x = (agent.x - agent.rotation.sin() * SWIM_SPEED).rem_euclid(1.0);
            agent.y = (agent.y + agent.rotation.cos() * SWIM_SPEED).rem_euclid(1.0);
        }
    }

    fn world(&self) -> WorldSnapshot {
        self.world.clone()
    }
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!(
        "shoal aquarium: {SCHOOL_SIZE} fish at {TARGET_FPS} fps -- close the window to quit"
    );

    let scheduler = FrameScheduler::new(DriftingSchool::seeded(7), TARGET_FPS)?;
    run_windowed(
        scheduler,
        ViewerConfig {
            title: "shoal aquarium".to_owned(),
            ..ViewerConfig::default()
        },
    )
}
