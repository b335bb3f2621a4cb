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


//! Checks the counter's accuracy over a set of value ranges and exits with a
//! failure status if any trial exceeds the tolerance.

use clap::Parser;
use uniqcount::common::random::XorShift64;
use uniqcount::hll::DEFAULT_LG_REGISTERS;
use uniqcount::validation::DEFAULT_SAMPLES;
use uniqcount::validation::DEFAULT_TOLERANCE;
use uniqcount::validation::TrialConfig;
use uniqcount::validation::default_ranges;
use uniqcount::validation::run_trial;

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Number of values drawn in each trial.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
    count: u32,

    /// Upper bound of the drawn values; repeat for several trials. Defaults to
    /// 1, 10, 1000, 10000, count/10, count and 10*count.
    #[arg(short, long = "range")]
    ranges: Vec<i32>,

    /// Largest accepted relative error.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Seed of the value generator. Seeded from the clock if absent.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log2 of the register count.
    #[arg(short, long, default_value_t = DEFAULT_LG_REGISTERS)]
    lg_registers: u8,
}

fn main() -> anyhow::Result<()> {
    let opts = Options::parse();

    let ranges = if opts.ranges.is_empty() {
        default_ranges(opts.count)
    } else {
        opts.ranges
    };
    let mut rng = match opts.seed {
        Some(seed) => XorShift64::seeded(seed),
        None => XorShift64::default(),
    };

    let mut failed = 0;
    for range in ranges {
        let config = TrialConfig::new(opts.count, range)?.with_lg_registers(opts.lg_registers);
        let report = run_trial(&config, &mut rng)?;
        println!("{report}");
        if let Err(err) = report.ensure_within(opts.tolerance) {
            eprintln!("{err}");
            failed += 1;
        }
    }

    anyhow::ensure!(failed == 0, "{failed} trial(s) exceeded the tolerance");
    Ok(())
}
