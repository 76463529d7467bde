use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait DriftSource: Send {
    fn sample(&mut self, amplitude: f32) -> f32;
}

pub struct RandomDrift {
    rng: StdRng,
}

impl RandomDrift {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DriftSource for RandomDrift {
    fn sample(&mut self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-amplitude..=amplitude)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedDrift {
    offsets: VecDeque<f32>,
}

impl ScriptedDrift {
    pub fn new(offsets: impl IntoIterator<Item = f32>) -> Self {
        Self {
            offsets: offsets.into_iter().collect(),
        }
    }
}

impl DriftSource for ScriptedDrift {
    fn sample(&mut self, amplitude: f32) -> f32 {
        self.offsets
            .pop_front()
            .unwrap_or(0.0)
            .clamp(-amplitude, amplitude)
    }
}
