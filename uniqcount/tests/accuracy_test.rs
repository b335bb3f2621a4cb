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


use googletest::assert_that;
use googletest::prelude::le;
use uniqcount::common::random::XorShift64;
use uniqcount::hll::Correction;
use uniqcount::validation::DEFAULT_SAMPLES;
use uniqcount::validation::DEFAULT_TOLERANCE;
use uniqcount::validation::TrialConfig;
use uniqcount::validation::default_ranges;
use uniqcount::validation::run_trial;

const SEED: u64 = 20240101;

#[test]
fn test_default_ranges_within_tolerance() {
    let mut rng = XorShift64::seeded(SEED);
    for range in default_ranges(DEFAULT_SAMPLES) {
        let config = TrialConfig::new(DEFAULT_SAMPLES, range).unwrap();
        let report = run_trial(&config, &mut rng).unwrap();
        assert_that!(report.relative_error(), le(DEFAULT_TOLERANCE));
        report.ensure_within(DEFAULT_TOLERANCE).unwrap();

        let expected = if range <= 10_000 {
            Correction::LinearCounting
        } else {
            Correction::None
        };
        assert_eq!(report.correction(), expected, "{report}");
    }
}

#[test]
fn test_single_value_repeated() {
    let config = TrialConfig::new(DEFAULT_SAMPLES, 1).unwrap();
    let report = run_trial(&config, &mut XorShift64::seeded(SEED)).unwrap();
    assert_eq!(report.exact(), 1);
    assert_eq!(report.estimate(), 1);
    assert_eq!(report.relative_error(), 0.0);
}

#[test]
fn test_range_beyond_samples() {
    // ten candidates per draw: nearly every draw is distinct
    let config = TrialConfig::new(DEFAULT_SAMPLES, 10_000_000).unwrap();
    let report = run_trial(&config, &mut XorShift64::seeded(SEED + 1)).unwrap();
    assert!(report.exact() > 900_000);
    assert_that!(report.relative_error(), le(DEFAULT_TOLERANCE));
}

#[test]
fn test_other_register_widths() {
    for lg in [10, 16] {
        let config = TrialConfig::new(200_000, 100_000)
            .unwrap()
            .with_lg_registers(lg);
        let report = run_trial(&config, &mut XorShift64::seeded(SEED)).unwrap();
        assert_that!(report.relative_error(), le(DEFAULT_TOLERANCE));
    }
}
