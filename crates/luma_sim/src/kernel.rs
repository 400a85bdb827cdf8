//! The cycle kernel: a deterministic per-cycle phase loop with a
//! stable-read barrier.
//!
//! [`CycleKernel`] advances simulated time one clock cycle at a time and
//! resumes every registered task at each phase of the cycle. All components
//! of the verification core (driver, checkers, output builder) implement
//! [`TbTask`] and are suspended between resumptions, which reproduces the
//! single-threaded cooperative scheduling of an event-driven testbench
//! without real threads: resume order is the task slice order, every cycle,
//! forever.

use crate::bus::SignalBus;
use crate::dut::DutModel;
use crate::error::SimError;
use crate::time::SimTime;

/// A testbench task resumed by the kernel at fixed points in each cycle.
///
/// All methods default to doing nothing, so a task only implements the
/// phases it cares about. Returning an error aborts the entire cycle (and,
/// through the caller, the whole run): checker verdicts have no partial
/// success state.
pub trait TbTask<E> {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Resumed just after the falling edge. The only phase with write
    /// access to the bus; drivers do their work here.
    fn drive(&mut self, bus: &mut dyn SignalBus, time: SimTime) -> Result<(), E> {
        let _ = (bus, time);
        Ok(())
    }

    /// Resumed once falling-edge writes have settled. Read-only.
    fn sample_falling(&mut self, bus: &dyn SignalBus, time: SimTime) -> Result<(), E> {
        let _ = (bus, time);
        Ok(())
    }

    /// Resumed once the rising edge has clocked the DUT's registers and
    /// outputs have settled. Read-only.
    fn sample_rising(&mut self, bus: &dyn SignalBus, time: SimTime) -> Result<(), E> {
        let _ = (bus, time);
        Ok(())
    }
}

/// Drives the clock and resumes tasks phase by phase.
///
/// One call to [`cycle`](CycleKernel::cycle) is one full clock period:
/// falling edge, settle, rising edge, settle. The falling edge of cycle `c`
/// is at `c * period`; the rising edge half a period later.
#[derive(Debug)]
pub struct CycleKernel {
    time: SimTime,
    half_period_fs: u64,
    cycles: u64,
}

impl CycleKernel {
    /// Creates a kernel with the given clock period in femtoseconds.
    pub fn new(period_fs: u64) -> Result<Self, SimError> {
        if period_fs == 0 {
            return Err(SimError::ZeroClockPeriod);
        }
        if period_fs % 2 != 0 {
            return Err(SimError::OddClockPeriod { period_fs });
        }
        Ok(Self {
            time: SimTime::ZERO,
            half_period_fs: period_fs / 2,
            cycles: 0,
        })
    }

    /// The current simulated time (the falling edge of the next cycle).
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs one full clock cycle, resuming `tasks` in order at each phase.
    ///
    /// The first task error aborts the cycle immediately; remaining tasks
    /// are not resumed and the DUT is left mid-cycle.
    pub fn cycle<D: DutModel, E>(
        &mut self,
        dut: &mut D,
        tasks: &mut [&mut dyn TbTask<E>],
    ) -> Result<(), E> {
        let fall = self.time;
        for task in tasks.iter_mut() {
            task.drive(dut, fall)?;
        }
        let fall_stable = fall.settled();
        for task in tasks.iter_mut() {
            task.sample_falling(dut, fall_stable)?;
        }

        dut.rising_edge();
        let rise_stable = fall.plus_fs(self.half_period_fs).settled();
        for task in tasks.iter_mut() {
            task.sample_rising(dut, rise_stable)?;
        }

        self.time = fall.plus_fs(self.half_period_fs * 2);
        self.cycles += 1;
        Ok(())
    }
}
