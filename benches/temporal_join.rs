use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hosewebview::app::services::temporal_join::TemporalJoin;
use hosewebview::{Metric, Reading, SourceKind, Station};
use std::hint::black_box;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Each station moves location every 30 days over a year
fn stations(count: usize) -> Vec<Station> {
    let mut stations = Vec::new();
    for id in 0..count {
        for tenure in 0..12 {
            let from = t0() + Duration::days(30 * tenure);
            let to = (tenure < 11).then(|| from + Duration::days(30));
            stations.push(Station {
                station_id: format!("station_{}", id),
                location: format!("location_{}", (id + tenure as usize) % count),
                sublocation: String::new(),
                description: String::new(),
                valid_from: from,
                valid_to: to,
                is_current: to.is_none(),
            });
        }
    }
    stations
}

/// One reading per station every ten minutes
fn readings(station_count: usize, count: usize) -> Vec<Reading> {
    (0..count)
        .map(|i| Reading {
            station_id: format!("station_{}", i % station_count),
            timestamp_utc: t0() + Duration::minutes(10 * (i / station_count) as i64),
            metric: Metric::TempC,
            value: 20.0,
            source_kind: SourceKind::ArchivedFixed,
        })
        .collect()
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_join");
    let stations = stations(20);

    for num_readings in [1_000usize, 10_000, 100_000].iter() {
        let readings = readings(20, *num_readings);
        group.throughput(Throughput::Elements(*num_readings as u64));

        group.bench_with_input(
            BenchmarkId::new("indexed", num_readings),
            &readings,
            |b, readings| {
                let join = TemporalJoin::new(&stations);
                b.iter(|| black_box(join.join(readings.iter().cloned()).count()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_join);
criterion_main!(benches);
