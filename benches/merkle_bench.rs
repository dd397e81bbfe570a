//! Balance commitment benchmarks using Criterion
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use treasury_commit::merkle::{build_root, verify, BalanceMerkleTree};
use treasury_commit::primitives::BalanceAttestation;

fn sample_attestations(n: usize) -> Vec<BalanceAttestation> {
    (0..n)
        .rev()
        .map(|i| {
            BalanceAttestation::new(
                format!("bc1qbench{:032x}", i * 7919),
                (i as u64 + 1) * 12_345,
                1_700_000_000,
            )
        })
        .collect()
}

fn bench_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_root");

    for leaves in [16usize, 256, 1_024, 4_096].iter() {
        let attestations = sample_attestations(*leaves);

        group.throughput(Throughput::Elements(*leaves as u64));
        group.bench_with_input(BenchmarkId::new("leaves", leaves), leaves, |b, _| {
            b.iter(|| build_root(black_box(&attestations)))
        });
    }

    group.finish();
}

fn bench_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("proof_extraction");

    for leaves in [256usize, 4_096].iter() {
        let tree = BalanceMerkleTree::from_attestations(&sample_attestations(*leaves));
        let index = leaves / 3;

        group.bench_with_input(BenchmarkId::new("leaves", leaves), &tree, |b, tree| {
            b.iter(|| tree.proof(black_box(index)).expect("proof extraction failed"))
        });
    }

    group.finish();
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("verification");

    // Pre-build proofs; verification cost grows with depth only
    for leaves in [16usize, 1_024, 4_096].iter() {
        let tree = BalanceMerkleTree::from_attestations(&sample_attestations(*leaves));
        let target = tree.attestations()[leaves / 2].clone();
        let proof = tree.proof(leaves / 2).expect("proof extraction failed");
        let root = tree.root().to_hex();

        group.bench_with_input(
            BenchmarkId::new("depth", tree.depth()),
            &(target, proof, root),
            |b, (target, proof, root)| {
                b.iter(|| {
                    verify(
                        black_box(&target.address),
                        target.balance,
                        target.timestamp,
                        black_box(root),
                        black_box(proof),
                    )
                    .expect("verification failed")
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_root, bench_proof, bench_verification);

criterion_main!(benches);
