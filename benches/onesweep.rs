use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nanorand::{Rng, WyRand};
use onesweep::{inclusive_scan, OnesweepSort, Plus, ScanConfig};

fn gen_u32(n: usize) -> Vec<u32> {
    let mut rng = WyRand::new_seed(0xDECAF);
    (0..n).map(|_| rng.generate::<u64>() as u32).collect()
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_u32");
    for n in [100_000usize, 1_000_000, 10_000_000] {
        let input = gen_u32(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("onesweep", n), &input, |b, input| {
            b.iter(|| {
                let mut keys = input.clone();
                keys.onesweep_sort().unwrap();
                black_box(keys)
            })
        });

        group.bench_with_input(BenchmarkId::new("std_unstable", n), &input, |b, input| {
            b.iter(|| {
                let mut keys = input.clone();
                keys.sort_unstable();
                black_box(keys)
            })
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("inclusive_scan_u32");
    for n in [1_000_000usize, 10_000_000] {
        let input = gen_u32(n);
        let config = ScanConfig::default();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("lookback", n), &input, |b, input| {
            let mut out = vec![0u32; input.len()];
            b.iter(|| {
                inclusive_scan(input, &mut out, &Plus, &config).unwrap();
                black_box(out.last().copied())
            })
        });

        group.bench_with_input(BenchmarkId::new("sequential", n), &input, |b, input| {
            let mut out = vec![0u32; input.len()];
            b.iter(|| {
                let mut running = 0u32;
                for (slot, &value) in out.iter_mut().zip(input.iter()) {
                    running = running.wrapping_add(value);
                    *slot = running;
                }
                black_box(out.last().copied())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_scan);
criterion_main!(benches);
