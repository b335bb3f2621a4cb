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


//! Single-block MurmurHash3 (x86, 32-bit) specialised for one `i32` key.

/// Seed mixed into every hash.
pub const HASH_SEED: u32 = 0x0000_0139;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const N: u32 = 0xe654_6b64;

/// Length in bytes of the one block being hashed.
const KEY_LEN: u32 = 4;

/// Hashes a 32-bit integer into a well-distributed 32-bit value.
///
/// The result equals MurmurHash3 x86_32 over the little-endian bytes of `x`
/// seeded with [`HASH_SEED`]. The sign bit takes part in mixing like any other
/// bit. All arithmetic wraps.
///
/// # Examples
///
/// ```
/// # use uniqcount::hash::hash32;
/// assert_eq!(hash32(42), hash32(42));
/// assert_ne!(hash32(42), hash32(43));
/// ```
#[inline]
pub fn hash32(x: i32) -> u32 {
    let mut k = x as u32;
    k = k.wrapping_mul(C1);
    k = k.rotate_left(15);
    k = k.wrapping_mul(C2);

    let mut h = HASH_SEED;
    h ^= k;
    h = h.rotate_left(13);
    h = h.wrapping_mul(5).wrapping_add(N);

    h ^= KEY_LEN;
    fmix32(h)
}

/// Final avalanche step.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(hash32(0), 0xd619_09ad);
        assert_eq!(hash32(1), 0xdda7_e30f);
        assert_eq!(hash32(-1), 0xa527_3a3a);
        assert_eq!(hash32(42), 0x57f7_bb1b);
        assert_eq!(hash32(i32::MAX), 0xcfd7_c2d7);
        assert_eq!(hash32(i32::MIN), 0x9d82_cb8e);
    }

    #[test]
    fn test_deterministic() {
        for x in [-7, 0, 3, 1 << 20, i32::MIN] {
            assert_eq!(hash32(x), hash32(x));
        }
    }

    #[test]
    fn test_matches_murmur3_x86_32() {
        for x in (-2000..2000).chain([i32::MIN, i32::MAX, 0x1234_5678]) {
            let expected = mur3::murmurhash3_x86_32(&x.to_le_bytes(), HASH_SEED);
            assert_eq!(hash32(x), expected, "mismatch for {x}");
        }
    }

    #[test]
    fn test_avalanche() {
        // flipping the lowest input bit changes roughly half of the output bits
        let mut total = 0;
        for x in 0..1024 {
            total += (hash32(x) ^ hash32(x ^ 1)).count_ones();
        }
        let mean = total as f64 / 1024.0;
        assert!((12.0..20.0).contains(&mean), "mean flipped bits {mean}");
    }
}
