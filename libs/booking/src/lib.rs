//! The pure booking core: slot grids, peak pricing, duration catalogs, and
//! availability computation
//!
//! Nothing in this crate performs I/O; everything is a deterministic
//! function of its inputs. The write path in `models/reservation` re-runs
//! these checks against fresh database state before committing.

mod availability;
mod catalog;
mod grid;
mod peak;
mod rates;
mod venue;

pub use availability::*;
pub use catalog::*;
pub use grid::*;
pub use peak::*;
pub use rates::*;
pub use venue::*;
