//! Event records handed over by the generator
//!
//! The generator itself is external. It is seen through [`EventSource`],
//! which yields one [`Event`] (a flat list of particle records with
//! mother/daughter links) per attempt.
//!
//! # Example
//!
//! ```
//! use histbook::event::{pdg, Event, Particle};
//!
//! let mut event = Event::new();
//! let b = event.push(Particle::decayed(pdg::B_PLUS, 30.0));
//! let x = event.push_daughter(b, Particle::decayed(pdg::X_3872, 20.0));
//! event.push_daughter(b, Particle::final_state(pdg::K_PLUS, 10.0));
//! event.push_daughter(x, Particle::final_state(pdg::PHOTON, 11.0));
//! event.push_daughter(x, Particle::final_state(pdg::PHOTON, 9.0));
//!
//! assert_eq!(event.n_final(), 3);
//! assert_eq!(event.n_final_charged(), 1);
//! assert_eq!(event.find_last(pdg::B_PLUS), Some(b));
//! assert_eq!(event.daughters_recursive(b).len(), 4);
//! ```

pub mod pdg;
mod toy;

pub use toy::ToyEventSource;

/// One particle record
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// PDG identifier, negative for antiparticles
    pub id: i32,
    /// Energy in GeV
    pub energy: f64,
    /// Whether the particle survives to the final state
    pub is_final: bool,
    /// Index of the mother record
    pub mother: Option<usize>,
    /// Indices of the daughter records
    pub daughters: Vec<usize>,
}

impl Particle {
    /// Stable particle
    pub fn final_state(id: i32, energy: f64) -> Self {
        Self {
            id,
            energy,
            is_final: true,
            mother: None,
            daughters: Vec::new(),
        }
    }

    /// Intermediate particle that decayed
    pub fn decayed(id: i32, energy: f64) -> Self {
        Self {
            is_final: false,
            ..Self::final_state(id, energy)
        }
    }

    pub fn name(&self) -> &'static str {
        pdg::name(self.id)
    }

    pub fn charge(&self) -> i32 {
        pdg::charge(self.id)
    }

    pub fn is_charged(&self) -> bool {
        self.charge() != 0
    }
}

/// Particle record of one generated event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    particles: Vec<Particle>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning its index
    pub fn push(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Append a record as a daughter of `mother`, linking both ways
    ///
    /// # Panics
    ///
    /// Panics if `mother` is not a valid index
    pub fn push_daughter(&mut self, mother: usize, mut particle: Particle) -> usize {
        assert!(mother < self.particles.len(), "mother index out of range");

        particle.mother = Some(mother);
        let index = self.push(particle);
        self.particles[mother].daughters.push(index);
        index
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Final-state particles
    pub fn final_state(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_final)
    }

    /// Number of final-state particles
    pub fn n_final(&self) -> usize {
        self.final_state().count()
    }

    /// Number of charged final-state particles
    pub fn n_final_charged(&self) -> usize {
        self.final_state().filter(|p| p.is_charged()).count()
    }

    /// Index of the last record whose absolute identifier is `|id|`
    ///
    /// After decays and rescattering the generator keeps copies of a
    /// particle; the last copy carries the final decay products.
    pub fn find_last(&self, id: i32) -> Option<usize> {
        let id = id.abs();
        self.particles.iter().rposition(|p| p.id.abs() == id)
    }

    /// Direct daughters of the record at `index`
    pub fn daughters(&self, index: usize) -> Vec<usize> {
        self.particles
            .get(index)
            .map(|p| p.daughters.clone())
            .unwrap_or_default()
    }

    /// All descendants of the record at `index`, depth first
    pub fn daughters_recursive(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.daughters(index).into_iter().rev().collect();

        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.daughters(current).into_iter().rev());
        }

        out
    }

    /// `"B+ -> X_3872 K+"` style summary of a decay
    pub fn describe_decay(&self, index: usize, recursive: bool) -> String {
        let Some(particle) = self.particles.get(index) else {
            return String::new();
        };
        let daughters = if recursive {
            self.daughters_recursive(index)
        } else {
            self.daughters(index)
        };
        let names: Vec<&str> = daughters
            .iter()
            .filter_map(|&i| self.particles.get(i))
            .map(Particle::name)
            .collect();

        format!("{} -> {}", particle.name(), names.join(" "))
    }
}

/// Producer of generated events
pub trait EventSource {
    /// Generate the next event
    ///
    /// `None` means the generation attempt failed; the caller skips it and
    /// may keep asking.
    fn next_event(&mut self) -> Option<Event>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Option<Event> {
        (**self).next_event()
    }
}
