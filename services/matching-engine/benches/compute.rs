use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matching_engine::{MatchingConfig, MatchingEngine};
use qf_types::contribution::Contribution;
use qf_types::ids::{DonorId, ProjectId};
use qf_types::ledger::ProjectLedger;
use rust_decimal::Decimal;

fn build_ledger(projects: u64, donors: u64) -> ProjectLedger {
    let mut ledger = ProjectLedger::new();
    for project in 0..projects {
        for donor in 0..donors {
            let cents = ((project * 7919 + donor * 104_729) % 50_000 + 100) as i64;
            ledger.record(Contribution {
                project_id: ProjectId::new(project),
                donor_id: DonorId::new(format!("0x{donor:040x}")),
                amount: Decimal::new(cents, 2),
            });
        }
    }
    ledger
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let pool = Decimal::from(1_000_000);
    let sequential = MatchingEngine::new(MatchingConfig::sequential()).unwrap();
    let parallel = MatchingEngine::new(MatchingConfig {
        parallel_threshold: 0,
        ..MatchingConfig::default()
    })
    .unwrap();

    for (projects, donors) in [(100u64, 100u64), (1_000, 200)] {
        let ledger = build_ledger(projects, donors);
        let label = format!("{projects}x{donors}");
        group.bench_with_input(BenchmarkId::new("sequential", &label), &ledger, |b, ledger| {
            b.iter(|| sequential.compute(black_box(ledger), pool).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", &label), &ledger, |b, ledger| {
            b.iter(|| parallel.compute(black_box(ledger), pool).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
