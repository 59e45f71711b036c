//! Venue label sampling.
//!
//! Court name and room are display metadata drawn at random per entry.
//! They carry no scheduling meaning. A fixed seed makes them reproducible.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SchedulerConfig;
use crate::models::Venue;

/// Draws venue labels from configured lists.
#[derive(Debug, Clone)]
pub struct VenueSampler {
    rng: StdRng,
    courts: Vec<String>,
    rooms: Vec<String>,
}

impl VenueSampler {
    /// Creates a sampler seeded from `config.venue_seed`, or from OS
    /// entropy when no seed is set.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        let rng = match config.venue_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            courts: config.courts.clone(),
            rooms: config.rooms.clone(),
        }
    }

    /// Draws one venue. Empty lists yield empty labels.
    pub fn sample(&mut self) -> Venue {
        let court_name = self.courts.choose(&mut self.rng).cloned().unwrap_or_default();
        let court_room = self.rooms.choose(&mut self.rng).cloned().unwrap_or_default();
        Venue {
            court_name,
            court_room,
        }
    }
}
