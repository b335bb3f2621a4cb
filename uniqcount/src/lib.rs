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


//! # uniqcount
//!
//! Estimates the number of distinct `i32` values in a stream with a
//! fixed-size HyperLogLog register array. With the default 8192 registers
//! the counter uses 8 KiB and its relative standard error is about 1.2 %.
//!
//! ```rust
//! # use uniqcount::hll::UniqCounter;
//! let mut counter = UniqCounter::new();
//! for v in 0..50_000 {
//!     counter.add(v);
//! }
//! let error = (counter.estimate() - 50_000).abs() as f64 / 50_000.0;
//! assert!(error < 0.05);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod error;
pub mod hash;
pub mod hll;
pub mod validation;
