//! Parallel execution support for SBML
//!
//! Lines are independent, so a source file can be processed on a thread pool
//! as long as outcomes are reported in input order.

mod executor;

pub use executor::{process_lines_parallel, ParallelConfig};
