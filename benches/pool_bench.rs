use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatch_sim::pool::ServerPool;

const SESSIONS: usize = 1_000;

// Returns how many sessions got a slot.
fn churn(capacity: usize) -> usize {
    let mut pool = ServerPool::new(capacity);
    let mut busy = Vec::new();
    for session in 0..SESSIONS {
        if let Some(slot) = pool.acquire(session) {
            busy.push(slot);
        }
    }

    let mut served = busy.len();
    let mut round = 0usize;
    while let Some(slot) = busy.pop() {
        let target = if round % 2 == 0 { capacity / 2 } else { capacity };
        let grants = pool.review_capacity(target);
        served += grants.len();
        busy.extend(grants.into_iter().map(|grant| grant.slot));
        if let Some(grant) = pool.release(slot).expect("slot should be busy") {
            busy.push(grant.slot);
            served += 1;
        }
        round += 1;
    }
    served
}

fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool");
    for capacity in [4usize, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("resize-churn", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| black_box(churn(capacity)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pool);
criterion_main!(benches);
