// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

/// Run-length knobs read from `CLASSDIFF_BENCH` as `key=value` pairs separated by `,`, e.g.
/// `CLASSDIFF_BENCH=samples=20,warmup=1,measure=2,freq=500`. Unknown keys are ignored.
#[derive(Debug, Clone, Copy)]
struct BenchSettings {
    samples: usize,
    warmup: Duration,
    measure: Duration,
    profile_hz: i32,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            samples: 50,
            warmup: Duration::from_secs(2),
            measure: Duration::from_secs(4),
            profile_hz: 100,
        }
    }
}

fn parse_clamped<T: FromStr + Ord>(raw: &str, min: T, max: T) -> Option<T> {
    raw.trim().parse::<T>().ok().map(|value| value.clamp(min, max))
}

impl BenchSettings {
    fn from_spec(spec: &str) -> Self {
        let mut settings = Self::default();
        for (key, value) in spec.split(',').filter_map(|pair| pair.split_once('=')) {
            match key.trim() {
                "samples" => {
                    settings.samples = parse_clamped(value, 10, 200).unwrap_or(settings.samples)
                }
                "warmup" => {
                    if let Some(secs) = parse_clamped(value, 1u64, 60) {
                        settings.warmup = Duration::from_secs(secs);
                    }
                }
                "measure" => {
                    if let Some(secs) = parse_clamped(value, 1u64, 120) {
                        settings.measure = Duration::from_secs(secs);
                    }
                }
                "freq" => {
                    settings.profile_hz = parse_clamped(value, 1, 1000).unwrap_or(settings.profile_hz)
                }
                _ => {}
            }
        }
        settings
    }
}

/// Criterion with a flamegraph profiler attached (active under `--profile-time`).
pub fn criterion() -> Criterion {
    let settings = std::env::var("CLASSDIFF_BENCH")
        .map(|spec| BenchSettings::from_spec(&spec))
        .unwrap_or_default();

    Criterion::default()
        .sample_size(settings.samples)
        .warm_up_time(settings.warmup)
        .measurement_time(settings.measure)
        .with_profiler(PProfProfiler::new(settings.profile_hz, Output::Flamegraph(None)))
}
