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


use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::hash32;
use crate::hll::Correction;
use crate::hll::DEFAULT_LG_REGISTERS;
use crate::hll::MAX_LG_REGISTERS;
use crate::hll::MIN_LG_REGISTERS;
use crate::hll::estimator;
use crate::hll::slot_and_rank;

/// A HyperLogLog counter of distinct `i32` values.
///
/// The register array is allocated once at construction and never resized.
/// Registers only ever grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqCounter {
    lg_registers: u8,
    registers: Box<[u8]>,
    /// Count of registers still at zero.
    num_zeros: u32,
}

impl Default for UniqCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl UniqCounter {
    /// Creates an empty counter with `2^13` registers.
    pub fn new() -> Self {
        Self::make(DEFAULT_LG_REGISTERS)
    }

    /// Creates an empty counter with `2^lg_registers` registers.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `lg_registers` is not in
    /// `[MIN_LG_REGISTERS, MAX_LG_REGISTERS]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use uniqcount::hll::UniqCounter;
    /// let counter = UniqCounter::with_lg_registers(10).unwrap();
    /// assert_eq!(counter.num_registers(), 1024);
    /// assert!(UniqCounter::with_lg_registers(40).is_err());
    /// ```
    pub fn with_lg_registers(lg_registers: u8) -> Result<Self, Error> {
        if !(MIN_LG_REGISTERS..=MAX_LG_REGISTERS).contains(&lg_registers) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                format!(
                    "lg_registers must be in [{MIN_LG_REGISTERS}, {MAX_LG_REGISTERS}], got {lg_registers}"
                ),
            )
            .with_context("lg_registers", lg_registers));
        }
        Ok(Self::make(lg_registers))
    }

    fn make(lg_registers: u8) -> Self {
        let m = 1u32 << lg_registers;
        Self {
            lg_registers,
            registers: vec![0u8; m as usize].into_boxed_slice(),
            num_zeros: m,
        }
    }

    /// Adds one observed value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use uniqcount::hll::UniqCounter;
    /// let mut counter = UniqCounter::new();
    /// counter.add(7);
    /// counter.add(7);
    /// assert_eq!(counter.estimate(), 1);
    /// ```
    pub fn add(&mut self, value: i32) {
        let (slot, rank) = slot_and_rank(hash32(value), self.lg_registers);
        let old = self.registers[slot];
        if rank > old {
            self.registers[slot] = rank;
            if old == 0 {
                self.num_zeros -= 1;
            }
        }
    }

    /// Returns the estimated number of distinct values added so far,
    /// truncated toward zero.
    ///
    /// An empty counter estimates `0`.
    pub fn estimate(&self) -> i64 {
        let (value, _) = estimator::estimate(&self.registers, self.num_zeros);
        value as i64
    }

    /// Returns which correction the current estimate goes through.
    pub fn correction(&self) -> Correction {
        estimator::estimate(&self.registers, self.num_zeros).1
    }

    /// Returns the uncorrected HyperLogLog estimate.
    pub fn raw_estimate(&self) -> f64 {
        estimator::raw_estimate(&self.registers)
    }

    /// Returns true if no value has been added.
    pub fn is_empty(&self) -> bool {
        self.num_zeros as usize == self.registers.len()
    }

    /// Returns log2 of the register count.
    pub fn lg_registers(&self) -> u8 {
        self.lg_registers
    }

    /// Returns the register count.
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Returns the number of registers still at zero.
    pub fn num_zeros(&self) -> u32 {
        self.num_zeros
    }

    /// Returns the value of register `index`, or `None` if out of range.
    pub fn register(&self, index: usize) -> Option<u8> {
        self.registers.get(index).copied()
    }

    /// Returns all registers.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }
}
