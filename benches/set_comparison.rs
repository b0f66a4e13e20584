use core::hash::BuildHasher;
use core::hint::black_box;

use chained_set::HashBucketTable;
use chained_set::policy::DefaultPolicy;
use chained_set::snapshot::flatten;
use chained_set::snapshot::rebuild;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashSet as HashbrownSet;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy, Default)]
struct SipBuilder;

impl BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

type Table = HashBucketTable<u64, DefaultPolicy<SipBuilder>>;

const SIZES: &[usize] = &[(1 << 8), (1 << 10), (1 << 12), (1 << 14)];

/// Bucket count used for a table expected to hold `size` elements.
fn buckets_for(size: usize) -> usize {
    size / 2
}

fn random_keys(count: usize) -> Vec<u64> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| rng.try_next_u64().unwrap())
        .collect()
}

fn filled_table(keys: &[u64]) -> Table {
    let mut table = Table::with_capacity(buckets_for(keys.len()));
    table.extend(keys.iter().copied());
    table
}

fn filled_hashbrown(keys: &[u64]) -> HashbrownSet<u64, SipBuilder> {
    let mut set = HashbrownSet::with_capacity_and_hasher(keys.len(), SipBuilder::default());
    set.extend(keys.iter().copied());
    set
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("chained_set/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut table = Table::with_capacity(buckets_for(size));
                    for key in keys {
                        black_box(table.add(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut set = HashbrownSet::with_hasher(SipBuilder::default());
                    for key in keys {
                        black_box(set.insert(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_contains_hit_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_hit_miss");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size * 2);
        let (present, _) = keys.split_at(size);
        let table = filled_table(present);
        let hashbrown = filled_hashbrown(present);
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_function(format!("chained_set/{size}"), |b| {
            b.iter(|| {
                for key in keys.iter() {
                    black_box(table.contains(key));
                }
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in keys.iter() {
                    black_box(hashbrown.contains(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let table = filled_table(&keys);
        let hashbrown = filled_hashbrown(&keys);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("chained_set/{size}"), |b| {
            b.iter_batched(
                || table.clone(),
                |mut table| {
                    for key in keys.iter() {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || hashbrown.clone(),
                |mut set| {
                    for key in keys.iter() {
                        black_box(set.remove(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_algebra");

    for &size in SIZES {
        let keys = random_keys(size * 3 / 2);
        let left = filled_table(&keys[..size]);
        let right = filled_table(&keys[size / 2..]);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("union_with/{size}"), |b| {
            b.iter_batched(
                || left.clone(),
                |mut table| {
                    table.union_with(&right);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("intersect_with/{size}"), |b| {
            b.iter_batched(
                || left.clone(),
                |mut table| {
                    table.intersect_with(&right);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("is_subset_of/{size}"), |b| {
            b.iter(|| black_box(left.is_subset_of(&right)))
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for &size in SIZES {
        let keys = random_keys(size);
        let table = filled_table(&keys);
        let flat = flatten(&table);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("flatten/{size}"), |b| {
            b.iter(|| black_box(flatten(&table)))
        });

        group.bench_function(format!("rebuild/{size}"), |b| {
            b.iter_batched(
                || (Table::with_capacity(buckets_for(size)), flat.clone()),
                |(mut table, flat)| {
                    black_box(rebuild(&mut table, flat));
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_contains_hit_miss,
    bench_remove,
    bench_set_algebra,
    bench_snapshot,
);

criterion_main!(benches);
