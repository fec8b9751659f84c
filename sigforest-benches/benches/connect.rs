//! Connectivity search benchmarks.
//!
//! Runs the phased search over a random necklace census with a fixed seed, so
//! each iteration performs the same walks and merges.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use sigforest_benches::{
    error::BenchSetupError,
    params::ConnectBenchParams,
    source::{SyntheticConfig, necklace_census},
};
use sigforest_core::{ConnectorBuilder, KeyedDisjointSet};
use sigforest_providers_necklace::{NecklaceCodec, NecklaceWalkBuilder};

/// Seed used for census generation and the search.
const SEED: u64 = 7;

/// Longest necklace in the generated census.
const MAX_LEN: usize = 10;

/// Census sizes to benchmark.
const CENSUS_SIZES: &[usize] = &[50, 200];

/// Bead counts the walks aim for.
const TARGET_LENS: &[usize] = &[4, 8];

fn connect_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("connect");
    group.sample_size(10);

    for &census_size in CENSUS_SIZES {
        let census = necklace_census(
            &SyntheticConfig {
                key_count: census_size,
                seed: SEED,
            },
            MAX_LEN,
        )?;
        let mut base = KeyedDisjointSet::with_name(NecklaceCodec, "bench");
        base.extend_keys(census);

        for &target_len in TARGET_LENS {
            let walk = NecklaceWalkBuilder::new(1, target_len).build()?;
            let connector = ConnectorBuilder::new()
                .with_target_size(target_len)
                .with_attempts(20)
                .with_max_rounds(50)
                .with_step_limit(100_000)
                .with_seed(SEED)
                .build()?;
            let params = ConnectBenchParams {
                census_size,
                target_len,
            };

            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &(&connector, &walk),
                |b, &(connector, walk)| {
                    b.iter_batched(
                        || base.clone(),
                        |mut set| connector.run(&mut set, walk),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn connect(c: &mut Criterion) {
    if let Err(err) = connect_impl(c) {
        panic!("connect benchmark setup failed: {err}");
    }
}

criterion_group!(benches, connect);
criterion_main!(benches);
