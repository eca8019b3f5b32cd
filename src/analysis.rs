//! Event loop filling the standard X(3872) study histograms
//!
//! The registry is passed in explicitly; nothing here keeps global state.
//! For parallel runs each worker owns a registry seeded from its own event
//! source, and the worker registries are merged at the end.

use tracing::{debug, info, trace, warn};

use crate::event::{pdg, Event, EventSource, ToyEventSource};
use crate::registry::{ExportOrder, Registry, RegistryError};

/// Energy of every final-state photon
pub const PHOTON_ENERGY: &str = "h_e_photons_all";
/// Final-state multiplicity
pub const ALL_MULTIPLICITY: &str = "h_all_mult";
/// Final-state photon multiplicity
pub const PHOTON_MULTIPLICITY: &str = "h_photon_mult";
/// Charged final-state multiplicity
pub const CHARGED_MULTIPLICITY: &str = "h_charged_mult";

/// Book the histograms filled by [`process_event`]
pub fn book_standard(registry: &mut Registry) {
    registry.book_one_axis(PHOTON_ENERGY, "E_{#gamma}", 100, 0.0, 8.0);
    registry.book_one_axis(ALL_MULTIPLICITY, " particle multiplicity", 50, 0.0, 1000.0);
    registry.book_one_axis(PHOTON_MULTIPLICITY, "photon multiplicity", 50, 0.0, 1000.0);
    registry.book_one_axis(
        CHARGED_MULTIPLICITY,
        "charged particle multiplicity",
        50,
        0.0,
        1000.0,
    );
}

/// What one event contributed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub n_final: usize,
    pub n_charged: usize,
    pub n_photons: usize,
    /// Whether a `B+ -> X(3872) K+` decay was found
    pub has_signal: bool,
}

/// Totals of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Generation attempts
    pub attempts: usize,
    /// Attempts that produced an event
    pub processed: usize,
    /// Events with a `B+ -> X(3872) K+` decay
    pub signal: usize,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.attempts - self.processed
    }

    fn add(&mut self, other: &RunSummary) {
        self.attempts += other.attempts;
        self.processed += other.processed;
        self.signal += other.signal;
    }
}

/// Find the last `B±` and check whether it decayed to `X(3872) K±`
///
/// Returns the indices of the X(3872) and the kaon. The two daughters are
/// stored in either order.
pub fn find_signal_decay(event: &Event) -> Option<(usize, usize)> {
    let b = event.find_last(pdg::B_PLUS)?;
    let daughters = event.daughters(b);
    let [first, second] = daughters[..] else {
        return None;
    };

    let is_x = |i: usize| event.get(i).is_some_and(|p| p.id.abs() == pdg::X_3872);
    let is_kaon = |i: usize| event.get(i).is_some_and(|p| p.id.abs() == pdg::K_PLUS);

    if is_x(first) && is_kaon(second) {
        Some((first, second))
    } else if is_x(second) && is_kaon(first) {
        Some((second, first))
    } else {
        None
    }
}

/// Fill the standard histograms from one event
///
/// Expects [`book_standard`] to have been called on `registry`.
pub fn process_event(registry: &mut Registry, event: &Event) -> Result<EventSummary, RegistryError> {
    let signal = find_signal_decay(event);
    if let (Some((x, kaon)), Some(b)) = (signal, event.find_last(pdg::B_PLUS)) {
        debug!(decay = %event.describe_decay(b, false), "found B decay");
        trace!(decay = %event.describe_decay(kaon, false), "kaon");
        trace!(decay = %event.describe_decay(x, false), "X(3872)");
    }

    let mut n_photons = 0;
    for particle in event.final_state().filter(|p| p.id == pdg::PHOTON) {
        n_photons += 1;
        registry.fill(PHOTON_ENERGY, particle.energy)?;
    }

    let n_final = event.n_final();
    let n_charged = event.n_final_charged();
    registry.fill(ALL_MULTIPLICITY, n_final as f64)?;
    registry.fill(CHARGED_MULTIPLICITY, n_charged as f64)?;
    registry.fill(PHOTON_MULTIPLICITY, n_photons as f64)?;

    Ok(EventSummary {
        n_final,
        n_charged,
        n_photons,
        has_signal: signal.is_some(),
    })
}

/// Run `attempts` generation attempts through [`process_event`]
///
/// Failed attempts are skipped but count toward the budget.
pub fn run<S: EventSource>(
    mut source: S,
    attempts: usize,
    registry: &mut Registry,
) -> Result<RunSummary, RegistryError> {
    let mut summary = RunSummary {
        attempts,
        ..RunSummary::default()
    };

    for attempt in 0..attempts {
        let Some(event) = source.next_event() else {
            warn!(attempt, "event generation failed, skipping");
            continue;
        };

        let event_summary = process_event(registry, &event)?;
        summary.processed += 1;
        if event_summary.has_signal {
            summary.signal += 1;
        }
    }

    info!(
        attempts = summary.attempts,
        processed = summary.processed,
        signal = summary.signal,
        "event loop finished"
    );
    Ok(summary)
}

/// Run the toy generator on `workers` threads and merge the results
///
/// Worker `i` uses seed `seed + i` and its share of the attempts. The
/// per-worker registries are merged in worker order, so the result does
/// not depend on thread scheduling.
///
/// # Panics
///
/// Panics if `workers` is zero
pub fn run_parallel(
    workers: usize,
    attempts: usize,
    seed: u64,
    order: ExportOrder,
) -> Result<(Registry, RunSummary), RegistryError> {
    assert!(workers > 0, "at least one worker is required");

    let shares: Vec<usize> = (0..workers)
        .map(|i| attempts / workers + usize::from(i < attempts % workers))
        .collect();

    let results: Vec<Result<(Registry, RunSummary), RegistryError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = shares
            .iter()
            .enumerate()
            .map(|(i, &share)| {
                scope.spawn(move || -> Result<(Registry, RunSummary), RegistryError> {
                    let mut registry = Registry::with_order(order);
                    book_standard(&mut registry);
                    let source = ToyEventSource::new(seed.wrapping_add(i as u64));
                    let summary = run(source, share, &mut registry)?;
                    Ok((registry, summary))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut merged = Registry::with_order(order);
    let mut total = RunSummary::default();
    for result in results {
        let (registry, summary) = result?;
        merged.merge(&registry)?;
        total.add(&summary);
    }

    info!(workers, processed = total.processed, "merged worker registries");
    Ok((merged, total))
}
