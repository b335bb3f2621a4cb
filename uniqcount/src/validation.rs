// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


//! Accuracy checks of [`UniqCounter`] against an exact distinct count.
//!
//! A trial draws `samples` values uniformly from `[1, range]`, feeds each one
//! to a fresh counter and to a hash set, and compares the two counts.
//!
//! ```rust
//! # use uniqcount::common::random::XorShift64;
//! # use uniqcount::validation::{run_trial, TrialConfig};
//! let config = TrialConfig::new(10_000, 1000).unwrap();
//! let report = run_trial(&config, &mut XorShift64::seeded(1)).unwrap();
//! assert!(report.relative_error() <= 0.1);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::common::random::RandomSource;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hll::Correction;
use crate::hll::DEFAULT_LG_REGISTERS;
use crate::hll::UniqCounter;

/// Default number of values drawn per trial.
pub const DEFAULT_SAMPLES: u32 = 1_000_000;
/// Default upper bound on the relative error of a trial.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Range bounds exercised for `samples` draws: from a single repeated value
/// up to ten times more candidates than draws.
pub fn default_ranges(samples: u32) -> Vec<i32> {
    let n = i32::try_from(samples).unwrap_or(i32::MAX);
    vec![
        1,
        10,
        1000,
        10000,
        (n / 10).max(1),
        n,
        n.saturating_mul(10),
    ]
}

/// Relative error of `got` against a non-zero `expected` count.
pub fn relative_error(expected: usize, got: i64) -> f64 {
    (got as f64 - expected as f64).abs() / expected as f64
}

/// Parameters of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialConfig {
    samples: u32,
    range: i32,
    lg_registers: u8,
}

impl TrialConfig {
    /// Creates a trial drawing `samples` values from `[1, range]`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if `samples` is zero or `range`
    /// is below one.
    pub fn new(samples: u32, range: i32) -> Result<Self, Error> {
        if samples == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "a trial needs at least one sample",
            ));
        }
        if range < 1 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("range bound must be at least 1, got {range}"),
            )
            .with_context("range", range));
        }
        Ok(Self {
            samples,
            range,
            lg_registers: DEFAULT_LG_REGISTERS,
        })
    }

    /// Sets log2 of the register count of the counter under test.
    ///
    /// The value is validated when the trial runs.
    pub fn with_lg_registers(mut self, lg_registers: u8) -> Self {
        self.lg_registers = lg_registers;
        self
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn range(&self) -> i32 {
        self.range
    }

    pub fn lg_registers(&self) -> u8 {
        self.lg_registers
    }
}

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialReport {
    samples: u32,
    range: i32,
    exact: usize,
    estimate: i64,
    correction: Correction,
}

impl TrialReport {
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn range(&self) -> i32 {
        self.range
    }

    /// Exact number of distinct values drawn.
    pub fn exact(&self) -> usize {
        self.exact
    }

    /// The counter's estimate.
    pub fn estimate(&self) -> i64 {
        self.estimate
    }

    /// Correction the estimate went through.
    pub fn correction(&self) -> Correction {
        self.correction
    }

    pub fn relative_error(&self) -> f64 {
        relative_error(self.exact, self.estimate)
    }

    /// Checks the relative error against `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ToleranceExceeded`] carrying the trial figures
    /// when the relative error is above `tolerance`.
    pub fn ensure_within(&self, tolerance: f64) -> Result<(), Error> {
        let error = self.relative_error();
        if error <= tolerance {
            return Ok(());
        }
        Err(Error::new(
            ErrorKind::ToleranceExceeded,
            format!("relative error {error:.5} exceeds {tolerance}"),
        )
        .with_context("range", self.range)
        .with_context("exact", self.exact)
        .with_context("estimate", self.estimate))
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} numbers in range [1 .. {}], {} uniq, {} result, {:.5} relative error",
            self.samples,
            self.range,
            self.exact,
            self.estimate,
            self.relative_error()
        )
    }
}

/// Runs one trial, drawing values from `rng`.
///
/// # Errors
///
/// Returns [`ErrorKind::ConfigInvalid`] if the configured register width is
/// out of range.
pub fn run_trial<R: RandomSource>(config: &TrialConfig, rng: &mut R) -> Result<TrialReport, Error> {
    let mut counter = UniqCounter::with_lg_registers(config.lg_registers)?;
    let mut all = HashSet::new();
    for _ in 0..config.samples {
        let value = rng.next_in_range(1, config.range);
        all.insert(value);
        counter.add(value);
    }

    Ok(TrialReport {
        samples: config.samples,
        range: config.range,
        exact: all.len(),
        estimate: counter.estimate(),
        correction: counter.correction(),
    })
}
