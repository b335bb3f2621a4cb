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


//! HyperLogLog counter of distinct 32-bit integers.
//!
//! # Overview
//!
//! [`UniqCounter`] keeps `m = 2^lg_registers` one-byte registers. Every added
//! value is hashed with [`hash32`](crate::hash::hash32); the top
//! `lg_registers` bits of the hash pick a register, and the remaining bits
//! give a rank, which is kept if it beats the register's current value.
//!
//! The estimate combines the registers with the classic harmonic-mean formula
//! and switches to linear counting for small cardinalities and to a
//! collision correction close to the size of the 32-bit hash space.
//!
//! # Usage
//!
//! ```rust
//! # use uniqcount::hll::UniqCounter;
//! let mut counter = UniqCounter::new();
//! for v in 0..1000 {
//!     counter.add(v % 100);
//! }
//! let estimate = counter.estimate();
//! assert!((90..=110).contains(&estimate));
//! ```

mod estimator;
mod sketch;

pub use self::estimator::Correction;
pub use self::sketch::UniqCounter;

/// Default log2 of the register count (8192 registers).
pub const DEFAULT_LG_REGISTERS: u8 = 13;
/// Minimum log2 of the register count.
pub const MIN_LG_REGISTERS: u8 = 7;
/// Maximum log2 of the register count.
pub const MAX_LG_REGISTERS: u8 = 16;

const HASH_BITS: u32 = u32::BITS;
const TOP_BIT: u32 = 1 << (HASH_BITS - 1);

/// Split a hash into the register it selects and the rank it carries.
#[inline]
fn slot_and_rank(hash: u32, lg_registers: u8) -> (usize, u8) {
    let lg = lg_registers as u32;
    let slot = hash >> (HASH_BITS - lg);
    let rank = rank(hash << lg, (HASH_BITS - lg) as u8);
    (slot as usize, rank)
}

/// One plus the number of leading zero bits of `fragment`, capped so the
/// result never exceeds `fragment_bits + 1`.
///
/// `fragment` is left-aligned: only its top `fragment_bits` bits are
/// meaningful. A zero fragment therefore ranks `fragment_bits + 1`.
#[inline]
fn rank(mut fragment: u32, fragment_bits: u8) -> u8 {
    let mut rank = 1;
    while rank <= fragment_bits && fragment & TOP_BIT == 0 {
        rank += 1;
        fragment <<= 1;
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_top_bit_set() {
        assert_eq!(rank(TOP_BIT, 19), 1);
        assert_eq!(rank(u32::MAX, 19), 1);
    }

    #[test]
    fn test_rank_counts_leading_zeros_plus_one() {
        assert_eq!(rank(TOP_BIT >> 1, 19), 2);
        assert_eq!(rank(TOP_BIT >> 5, 19), 6);
        assert_eq!(rank(TOP_BIT >> 18, 19), 19);
    }

    #[test]
    fn test_rank_capped() {
        // a zero fragment and one whose only set bit lies past the
        // meaningful bits both hit the cap
        assert_eq!(rank(0, 19), 20);
        assert_eq!(rank(TOP_BIT >> 19, 19), 20);
        assert_eq!(rank(0, 16), 17);
    }

    #[test]
    fn test_slot_and_rank() {
        // 0xd61909ad: top 13 bits select 6851, remaining bits 0x2135a000
        // have two leading zeros
        assert_eq!(slot_and_rank(0xd619_09ad, 13), (6851, 3));
        assert_eq!(slot_and_rank(0xffff_ffff, 13), (8191, 1));
        assert_eq!(slot_and_rank(0x0000_0000, 13), (0, 20));
        assert_eq!(slot_and_rank(0x0007_ffff, 13), (0, 1));
    }
}
