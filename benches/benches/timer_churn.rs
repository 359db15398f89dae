// Copyright 2025 the Row Actions Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use row_actions_timer::TimerQueue;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn bench_schedule_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_queue");
    for &n in &[256usize, 4096, 65536] {
        let mut rng = Rng::new(0x9e37_79b9_7f4a_7c15);
        let deadlines: Vec<Duration> = (0..n)
            .map(|_| Duration::from_millis(rng.next_u64() % 10_000))
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("schedule_drain_n{}", n), |b| {
            b.iter_batched(
                TimerQueue::<u32>::new,
                |mut q| {
                    for (i, &d) in deadlines.iter().enumerate() {
                        q.schedule(d, i as u32);
                    }
                    let mut fired = 0_usize;
                    while q.pop_expired(Duration::from_secs(10)).is_some() {
                        fired += 1;
                    }
                    black_box(fired);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Debounce pattern: nearly every timer is cancelled and re-armed before it fires.
fn bench_debounce_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_queue");
    for &n in &[256usize, 4096, 65536] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("cancel_rearm_n{}", n), |b| {
            b.iter_batched(
                TimerQueue::<u32>::new,
                |mut q| {
                    let mut now = Duration::ZERO;
                    let mut armed = q.schedule(now + Duration::from_millis(50), 0);
                    for i in 1..n {
                        now += Duration::from_millis(3);
                        q.cancel(armed);
                        armed = q.schedule(now + Duration::from_millis(50), i as u32);
                        black_box(q.pop_expired(now));
                    }
                    black_box(q.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schedule_drain, bench_debounce_churn);
criterion_main!(benches);
