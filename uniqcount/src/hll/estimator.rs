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


//! Cardinality estimation over a register array.
//!
//! The raw HyperLogLog estimate `α_m · m² / Σ 2^(-register)` is biased at
//! both ends of its range, so the result is corrected in two regimes:
//!
//! - **Small range** (`raw <= 2.5 · m`): linear counting over the registers
//!   that are still zero, `m · ln(m / zeros)`.
//! - **Large range** (`raw > 2^32 / 30`): hash collisions in the 32-bit hash
//!   space are accounted for with `-2^32 · ln(1 - raw / 2^32)`.

/// Size of the 32-bit hash space.
const POW_2_32: f64 = 4_294_967_296.0;

/// Raw estimates up to `SMALL_RANGE_FACTOR * m` fall back to linear counting.
const SMALL_RANGE_FACTOR: f64 = 2.5;

/// Raw estimates above `LARGE_RANGE_FRACTION * 2^32` get the collision correction.
const LARGE_RANGE_FRACTION: f64 = 1.0 / 30.0;

/// The correction applied on top of the raw estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Correction {
    /// The raw estimate is returned as is.
    None,
    /// Linear counting over empty registers replaced the raw estimate.
    LinearCounting,
    /// The raw estimate was corrected for 32-bit hash collisions.
    LargeRange,
}

/// Bias correction constant `α_m` for `m` registers.
#[inline]
pub(super) fn alpha(m: f64) -> f64 {
    0.7213 / (1.0 + 1.079 / m)
}

/// Uncorrected HyperLogLog estimate.
pub(super) fn raw_estimate(registers: &[u8]) -> f64 {
    let m = registers.len() as f64;
    // never zero: an empty register contributes 1.0
    let sum: f64 = registers.iter().map(|&v| inv_pow2(v)).sum();
    (alpha(m) * m * m) / sum
}

/// Corrected estimate and the correction that produced it.
///
/// `num_zeros` is the number of registers still at zero.
pub(super) fn estimate(registers: &[u8], num_zeros: u32) -> (f64, Correction) {
    let m = registers.len() as f64;
    let raw = raw_estimate(registers);

    if raw <= SMALL_RANGE_FACTOR * m {
        // with no empty register the logarithm is undefined, keep the raw value
        if num_zeros == 0 {
            return (raw, Correction::None);
        }
        let linear = m * (m / num_zeros as f64).ln();
        (linear, Correction::LinearCounting)
    } else if raw > LARGE_RANGE_FRACTION * POW_2_32 {
        (large_range(raw), Correction::LargeRange)
    } else {
        (raw, Correction::None)
    }
}

/// Collision correction for estimates approaching the hash space size.
///
/// Once `raw` reaches `2^32` every hash has been observed and the logarithm
/// is undefined; the estimate saturates at the hash space size.
fn large_range(raw: f64) -> f64 {
    let ratio = raw / POW_2_32;
    if ratio >= 1.0 {
        return POW_2_32;
    }
    -POW_2_32 * (1.0 - ratio).ln()
}

/// Compute 1 / 2^value (inverse power of 2)
#[inline]
fn inv_pow2(value: u8) -> f64 {
    if value == 0 {
        1.0
    } else if value <= 63 {
        1.0 / (1u64 << value) as f64
    } else {
        f64::exp2(-(value as f64))
    }
}

#[cfg(test)]
mod tests {
    use googletest::assert_that;
    use googletest::prelude::near;

    use super::*;

    #[test]
    fn test_empty_registers() {
        let registers = vec![0u8; 8192];
        assert_that!(raw_estimate(&registers), near(5908.111, 0.001));
        assert_eq!(estimate(&registers, 8192), (0.0, Correction::LinearCounting));
    }

    #[test]
    fn test_linear_counting() {
        let mut registers = vec![0u8; 8192];
        registers[..4096].fill(1);
        let (value, correction) = estimate(&registers, 4096);
        assert_eq!(correction, Correction::LinearCounting);
        assert_that!(value, near(8192.0 * 2f64.ln(), 1e-9));
    }

    #[test]
    fn test_small_range_without_zeros_keeps_raw() {
        let registers = vec![1u8; 128];
        let (value, correction) = estimate(&registers, 0);
        assert_eq!(correction, Correction::None);
        assert_that!(value, near(183.109, 0.001));
    }

    #[test]
    fn test_mid_range() {
        let registers = vec![2u8; 8192];
        let (value, correction) = estimate(&registers, 0);
        assert_eq!(correction, Correction::None);
        assert_that!(value, near(23632.446, 0.001));
    }

    #[test]
    fn test_large_range() {
        let registers = vec![16u8; 8192];
        let raw = raw_estimate(&registers);
        assert!(raw > LARGE_RANGE_FRACTION * POW_2_32);
        assert_that!(raw, near(387_193_990.008, 0.01));

        let (value, correction) = estimate(&registers, 0);
        assert_eq!(correction, Correction::LargeRange);
        assert_that!(value, near(405_772_258.624, 0.01));
        assert!(value > raw);
    }

    #[test]
    fn test_large_range_saturates() {
        // every register at its cap for 2^7 registers
        let registers = vec![26u8; 128];
        assert!(raw_estimate(&registers) > POW_2_32);
        assert_eq!(estimate(&registers, 0), (POW_2_32, Correction::LargeRange));
    }

    #[test]
    fn test_inv_pow2() {
        assert_eq!(inv_pow2(0), 1.0);
        assert_eq!(inv_pow2(1), 0.5);
        assert_eq!(inv_pow2(20), 1.0 / 1_048_576.0);
        assert_eq!(inv_pow2(64), f64::exp2(-64.0));
    }
}
