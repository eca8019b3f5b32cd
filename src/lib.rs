//! # Histbook
//!
//! Named histogram registry for Monte-Carlo event loops.
//!
//! Histbook keeps every histogram of a run under a string key, routes
//! observations to the right shape and exports everything in a fixed order
//! at the end of the run.
//!
//! ## Features
//!
//! - **Two shapes**: one-axis and two-axis equal-width histograms with
//!   underflow and overflow bins
//! - **Book before fill**: filling an unknown key or the wrong shape is an
//!   error value, never an implicit booking
//! - **Deterministic export**: declaration or lexicographic order, chosen
//!   once per registry
//! - **Mergeability**: per-worker registries combine by bin-wise addition
//!
//! ## Quick Start
//!
//! ```rust
//! use histbook::prelude::*;
//!
//! let mut hists = Registry::new();
//! hists.book_one_axis("h_e_photons_all", "E_{#gamma}", 100, 0.0, 8.0);
//! hists.book_two_axis("h_e_vs_mult", "E vs mult", 100, 0.0, 8.0, 50, 0.0, 1000.0);
//!
//! hists.fill("h_e_photons_all", 1.7)?;
//! hists.fill_2d("h_e_vs_mult", 1.7, 312.0)?;
//!
//! let mut sink = MemorySink::new();
//! hists.write_to(&mut sink)?;
//! assert_eq!(sink.names(), ["h_e_photons_all", "h_e_vs_mult"]);
//! # Ok::<(), RegistryError>(())
//! ```
//!
//! ## Distributed Computing
//!
//! Histograms implement the [`Accumulator`](traits::Accumulator) trait, and
//! whole registries can be merged, so independent workers can fill their own
//! copies and combine them afterwards:
//!
//! ```rust
//! use histbook::histogram::Hist1D;
//! use histbook::traits::Accumulator;
//!
//! let mut worker1 = Hist1D::new("t", 10, 0.0, 1.0);
//! let mut worker2 = Hist1D::new("t", 10, 0.0, 1.0);
//!
//! worker1.fill(0.25);
//! worker2.fill(0.75);
//!
//! Accumulator::merge(&mut worker1, &worker2).unwrap();
//! assert_eq!(worker1.entries(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `histbook` binary running the toy event loop

// Core traits always available
pub mod traits;

pub mod analysis;
pub mod config;
pub mod event;
pub mod histogram;
pub mod registry;
pub mod sink;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::histogram::{Axis, Binning, Hist1D, Hist2D, Histogram, Observation, Shape};
    pub use crate::registry::{ExportOrder, Registry, RegistryError};
    pub use crate::sink::{JsonLinesSink, MemorySink, Sink};
}

pub use histogram::{Hist1D, Hist2D, Histogram};
pub use registry::{ExportOrder, Registry, RegistryError};
