//! Action and observation space descriptors

use serde::{Deserialize, Serialize};

use crate::action::{ACTION_COUNT, Action};
use crate::config::{EnvConfig, Features};
use crate::observation::Observation;
use crate::rng::GameRng;

/// Integer actions `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub fn contains(&self, code: i64) -> bool {
        code >= 0 && (code as u64) < self.n as u64
    }

    /// Uniformly drawn action.
    pub fn sample(&self, rng: &mut GameRng) -> Action {
        let code = rng.rn2(self.n.min(ACTION_COUNT) as u32);
        // `code` is below ACTION_COUNT, so the lookup cannot fail.
        Action::from_code(i64::from(code)).unwrap_or(Action::Right)
    }
}

/// Integer box: every element in `[low, high]`, with a fixed shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpace {
    pub low: i32,
    pub high: i32,
    pub shape: Vec<usize>,
}

impl BoxSpace {
    pub fn new(low: i32, high: i32, shape: &[usize]) -> Self {
        Self {
            low,
            high,
            shape: shape.to_vec(),
        }
    }

    fn contains_value(&self, v: i32) -> bool {
        (self.low..=self.high).contains(&v)
    }

    pub fn contains_point(&self, point: &[i32; 2]) -> bool {
        self.shape == [2] && point.iter().all(|&v| self.contains_value(v))
    }

    pub fn contains_grid(&self, rows: &[[i32; 2]]) -> bool {
        self.shape == [rows.len(), 2]
            && rows
                .iter()
                .flatten()
                .all(|&v| self.contains_value(v))
    }
}

/// Bounds of every observation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub agent: BoxSpace,
    pub target: BoxSpace,
    pub ghosts: Option<BoxSpace>,
    /// Lower bound is -1 so collected candies stay inside the space.
    pub candies: Option<BoxSpace>,
}

impl ObservationSpace {
    pub fn from_config(config: &EnvConfig) -> Self {
        let high = config.size - 1;
        let features = config.features();
        Self {
            agent: BoxSpace::new(0, high, &[2]),
            target: BoxSpace::new(0, high, &[2]),
            ghosts: features
                .contains(Features::GHOSTS)
                .then(|| BoxSpace::new(0, high, &[config.effective_ghost_count(), 2])),
            candies: features
                .contains(Features::CANDIES)
                .then(|| BoxSpace::new(-1, high, &[config.effective_candies().len(), 2])),
        }
    }

    pub fn contains(&self, obs: &Observation) -> bool {
        let optional = |space: &Option<BoxSpace>, value: &Option<Vec<[i32; 2]>>| match (
            space, value,
        ) {
            (Some(space), Some(rows)) => space.contains_grid(rows),
            (None, None) => true,
            _ => false,
        };
        self.agent.contains_point(&obs.agent)
            && self.target.contains_point(&obs.target)
            && optional(&self.ghosts, &obs.ghosts)
            && optional(&self.candies, &obs.candies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete() {
        let space = Discrete { n: 4 };
        assert!(space.contains(0));
        assert!(space.contains(3));
        assert!(!space.contains(4));
        assert!(!space.contains(-1));

        let mut rng = GameRng::new(8);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[space.sample(&mut rng).code() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_full_observation_space() {
        let space = ObservationSpace::from_config(&EnvConfig::full());
        assert_eq!(space.agent, BoxSpace::new(0, 4, &[2]));
        assert_eq!(space.ghosts, Some(BoxSpace::new(0, 4, &[3, 2])));
        assert_eq!(space.candies, Some(BoxSpace::new(-1, 4, &[2, 2])));

        let obs = Observation {
            agent: [0, 0],
            target: [4, 4],
            ghosts: Some(vec![[1, 0], [2, 3], [4, 1]]),
            candies: Some(vec![[-1, -1], [3, 0]]),
        };
        assert!(space.contains(&obs));

        let outside = Observation {
            agent: [5, 0],
            ..obs.clone()
        };
        assert!(!space.contains(&outside));

        let missing = Observation {
            ghosts: None,
            ..obs
        };
        assert!(!space.contains(&missing));
    }

    #[test]
    fn test_simple_observation_space() {
        let space = ObservationSpace::from_config(&EnvConfig::simple());
        assert!(space.ghosts.is_none());
        assert!(space.candies.is_none());
        let obs = Observation {
            agent: [2, 1],
            target: [4, 4],
            ghosts: None,
            candies: None,
        };
        assert!(space.contains(&obs));
    }
}
