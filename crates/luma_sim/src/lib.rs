//! Deterministic cycle-level simulation kernel for the Luma harness.
//!
//! This crate supplies the clocked substrate the verification core runs on:
//! simulated time, a named signal bus, a per-cycle phase sequence with a
//! stable-read barrier, and behavioral DUT models of the grayscale pipeline
//! (including fault-injecting variants used to prove the checkers catch
//! real bugs).
//!
//! # Scheduling model
//!
//! All testbench tasks are resumed by [`CycleKernel`] at fixed points within
//! each simulated clock cycle:
//!
//! 1. **Falling edge** — drivers write input signals. The only phase where
//!    the bus is mutable to tasks.
//! 2. **Falling stable** — a read-only window after all falling-edge writes
//!    have settled.
//! 3. **Rising edge** — the DUT clocks its registers (tasks do not run).
//! 4. **Rising stable** — a read-only window with registered outputs settled.
//!
//! Within a phase, tasks resume in registration order. Because observers
//! only ever see an immutable bus, read-after-write ordering within a cycle
//! is enforced by construction rather than by convention.

#![warn(missing_docs)]

pub mod bus;
pub mod dut;
pub mod error;
pub mod kernel;
pub mod time;

pub use bus::{Signal, SignalBus};
pub use dut::{DutFault, DutModel, GrayscaleDut};
pub use error::SimError;
pub use kernel::{CycleKernel, TbTask};
pub use time::SimTime;
