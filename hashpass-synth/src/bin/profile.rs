//! Profiling binary for hashpass-synth
//!
//! Breaks one password synthesis into its steps and times each of them,
//! then averages whole syntheses through the library code path.

use std::hint::black_box;
use std::time::{Duration, Instant};

use hashpass_synth::synth::POSITION_STRIDE;
use hashpass_synth::{Algorithm, CharClasses, CharacterSet, HashFunction, PasswordSynthesizer};
use rand::RngCore;
use rand::rngs::OsRng;

const LENGTH: usize = 16;

struct Steps {
    label: &'static str,
    timings: Vec<(&'static str, Duration)>,
}

impl Steps {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            timings: Vec::new(),
        }
    }

    fn time<T>(&mut self, step: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.timings.push((step, start.elapsed()));
        out
    }

    fn finalize(self) {
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();
        println!("{}", self.label);
        for (step, elapsed) in &self.timings {
            let total_ns = total.as_nanos().max(1) as f64;
            let share = elapsed.as_nanos() as f64 / total_ns * 100.0;
            println!("  {step:<24} {:>10} ns ({share:5.1}%)", elapsed.as_nanos());
        }
        println!("  {:<24} {:>10} ns\n", "total", total.as_nanos());
    }
}

/// Profile a single synthesis, broken down by step.
fn profile_synthesis(algorithm: Algorithm) -> String {
    let mut steps = Steps::new(algorithm.name());

    let hash = steps.time("construct_hash", || {
        HashFunction::new(algorithm).expect("hash construction")
    });
    let charset = steps.time("build_charset", || {
        CharacterSet::from_classes(CharClasses::default()).expect("charset")
    });

    let origin = Instant::now();
    let inputs: Vec<i64> = steps.time("mix_entropy", || {
        (0..LENGTH as u64)
            .map(|i| {
                let clock = origin.elapsed().as_nanos() as u64;
                clock
                    .wrapping_add(i.wrapping_mul(POSITION_STRIDE))
                    .wrapping_add(OsRng.next_u64()) as i64
            })
            .collect()
    });

    let modulus = charset.modulus();
    let indices: Vec<u32> = steps.time("hash_inputs", || {
        inputs.iter().map(|k| hash.hash(*k, modulus)).collect()
    });

    let password: String = steps.time("select_chars", || {
        let chars = charset.as_chars();
        indices.iter().map(|index| chars[*index as usize]).collect()
    });

    steps.finalize();
    password
}

fn main() {
    println!("=== hashpass synthesis profiling ===\n");

    for algorithm in Algorithm::ALL {
        let password = profile_synthesis(algorithm);
        assert_eq!(password.chars().count(), LENGTH);
    }

    let iterations = 10_000u32;
    println!("=== Averaging over {iterations} iterations (using library code) ===\n");

    let charset = CharacterSet::from_classes(CharClasses::default()).expect("charset");
    for algorithm in Algorithm::ALL {
        let mut synth = PasswordSynthesizer::new(algorithm).expect("synthesizer");
        let start = Instant::now();
        for _ in 0..iterations {
            black_box(synth.generate(&charset, LENGTH).expect("synthesis"));
        }
        let per_iter = start.elapsed() / iterations;
        println!(
            "{:<30}: {} ns/password average",
            algorithm.name(),
            per_iter.as_nanos()
        );
    }
}
