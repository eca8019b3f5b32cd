//! Seeded stand-in for the external generator
//!
//! Produces events with a plausible final-state mix and, for a fraction of
//! them, the `B+ -> X(3872) K+`, `X(3872) -> gamma gamma` chain the analysis
//! looks for. Kinematics are deliberately crude.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{pdg, Event, EventSource, Particle};

/// Mean energy of the soft final-state particles, GeV
const MEAN_SOFT_ENERGY: f64 = 1.2;
/// X(3872) mass, GeV
const X_3872_MASS: f64 = 3.87169;

/// Final-state species and their cumulative selection probability
const SPECIES: [(i32, f64); 8] = [
    (pdg::PHOTON, 0.40),
    (pdg::PI_PLUS, 0.60),
    (pdg::PI_MINUS, 0.80),
    (pdg::K_PLUS, 0.84),
    (pdg::K_MINUS, 0.88),
    (pdg::PROTON, 0.91),
    (pdg::ANTIPROTON, 0.94),
    (pdg::NEUTRON, 1.00),
];

/// Deterministic toy event generator
///
/// # Example
///
/// ```
/// use histbook::event::{EventSource, ToyEventSource};
///
/// let mut a = ToyEventSource::new(7);
/// let mut b = ToyEventSource::new(7);
///
/// assert_eq!(a.next_event(), b.next_event());
/// ```
#[derive(Clone, Debug)]
pub struct ToyEventSource {
    rng: SmallRng,
    b_fraction: f64,
    failure_rate: f64,
    max_multiplicity: usize,
}

impl ToyEventSource {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            b_fraction: 0.2,
            failure_rate: 0.01,
            max_multiplicity: 900,
        }
    }

    /// Fraction of events carrying the B+ decay chain
    ///
    /// # Panics
    ///
    /// Panics if `fraction` is not in [0, 1]
    pub fn with_b_fraction(mut self, fraction: f64) -> Self {
        assert!((0.0..=1.0).contains(&fraction), "fraction must be in [0, 1]");
        self.b_fraction = fraction;
        self
    }

    /// Fraction of attempts that fail to produce an event
    ///
    /// # Panics
    ///
    /// Panics if `rate` is not in [0, 1]
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "rate must be in [0, 1]");
        self.failure_rate = rate;
        self
    }

    /// Upper bound of the soft final-state multiplicity
    ///
    /// # Panics
    ///
    /// Panics if `max` is below 2
    pub fn with_max_multiplicity(mut self, max: usize) -> Self {
        assert!(max >= 2, "multiplicity bound must be at least 2");
        self.max_multiplicity = max;
        self
    }

    fn soft_energy(&mut self) -> f64 {
        let u: f64 = self.rng.random();
        -MEAN_SOFT_ENERGY * (1.0 - u).ln()
    }

    fn species(&mut self) -> i32 {
        let u: f64 = self.rng.random();
        SPECIES
            .iter()
            .find(|(_, cumulative)| u < *cumulative)
            .map_or(pdg::NEUTRON, |(id, _)| *id)
    }

    fn add_b_chain(&mut self, event: &mut Event) {
        let x_energy = X_3872_MASS + self.soft_energy() * 4.0;
        let kaon_energy = 0.5 + self.soft_energy() * 2.0;

        let b = event.push(Particle::decayed(pdg::B_PLUS, x_energy + kaon_energy));
        // daughter order is not fixed, the analysis has to look at both
        let x = if self.rng.random_bool(0.5) {
            let x = event.push_daughter(b, Particle::decayed(pdg::X_3872, x_energy));
            event.push_daughter(b, Particle::final_state(pdg::K_PLUS, kaon_energy));
            x
        } else {
            event.push_daughter(b, Particle::final_state(pdg::K_PLUS, kaon_energy));
            event.push_daughter(b, Particle::decayed(pdg::X_3872, x_energy))
        };

        let share: f64 = self.rng.random_range(0.2..0.8);
        event.push_daughter(x, Particle::final_state(pdg::PHOTON, x_energy * share));
        event.push_daughter(x, Particle::final_state(pdg::PHOTON, x_energy * (1.0 - share)));
    }
}

impl EventSource for ToyEventSource {
    fn next_event(&mut self) -> Option<Event> {
        if self.rng.random_bool(self.failure_rate) {
            return None;
        }

        let mut event = Event::new();
        let multiplicity = self.rng.random_range(2..=self.max_multiplicity);
        for _ in 0..multiplicity {
            let id = self.species();
            let energy = self.soft_energy();
            event.push(Particle::final_state(id, energy));
        }

        if self.rng.random_bool(self.b_fraction) {
            self.add_b_chain(&mut event);
        }

        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let mut a = ToyEventSource::new(42);
        let mut b = ToyEventSource::new(42);

        for _ in 0..20 {
            assert_eq!(a.next_event(), b.next_event());
        }
    }

    #[test]
    fn test_always_b_chain() {
        let mut source = ToyEventSource::new(1)
            .with_b_fraction(1.0)
            .with_failure_rate(0.0);

        for _ in 0..50 {
            let event = source.next_event().unwrap();
            let b = event.find_last(pdg::B_PLUS).unwrap();
            let daughters = event.daughters(b);
            assert_eq!(daughters.len(), 2);
            let ids: Vec<i32> = daughters.iter().map(|&i| event.get(i).unwrap().id).collect();
            assert!(ids.contains(&pdg::X_3872));
            assert!(ids.contains(&pdg::K_PLUS));
        }
    }

    #[test]
    fn test_failures() {
        let mut source = ToyEventSource::new(3).with_failure_rate(1.0);
        assert!(source.next_event().is_none());
    }

    #[test]
    fn test_multiplicity_bound() {
        let mut source = ToyEventSource::new(9)
            .with_b_fraction(0.0)
            .with_failure_rate(0.0)
            .with_max_multiplicity(10);

        for _ in 0..100 {
            let event = source.next_event().unwrap();
            assert!(event.len() >= 2 && event.len() <= 10);
            assert!(event.particles().iter().all(|p| p.energy >= 0.0));
        }
    }
}
