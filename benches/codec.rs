//! Performance benchmarks for the replay codec.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use osredit::{mods, Gamemode, ReplayRecord};

fn sample_record(stream_len: usize) -> ReplayRecord {
    ReplayRecord {
        gamemode: Gamemode::Osu,
        game_version: 20231219,
        beatmap_hash: Some("9c0e4f3030cbbafd1c5e27918c216c11".into()),
        username: Some("benchplayer".into()),
        replay_hash: Some("6e0b23a2540f4e9c47b2484b8f33b079".into()),
        count_300: 1847,
        count_100: 42,
        count_50: 3,
        count_geki: 401,
        count_katu: 30,
        count_miss: 2,
        score: 71_823_994,
        max_combo: 2213,
        perfect: false,
        mods: (1 << 3) | (1 << 6),
        life_bar_graph: Some("0|1,3214|0.92,6530|1,".repeat(40)),
        timestamp_ticks: 638_390_016_000_000_000,
        action_stream: (0..stream_len).map(|i| (i % 256) as u8).collect(),
        replay_id: 4_531_816_022,
        path: None,
    }
}

/// Benchmark parsing with varying action-stream sizes
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for stream_len in [1024, 64 * 1024, 1024 * 1024] {
        let bytes = sample_record(stream_len).serialize();
        group.bench_with_input(
            BenchmarkId::new("stream_bytes", stream_len),
            &bytes,
            |b, bytes| {
                b.iter(|| {
                    black_box(ReplayRecord::parse(bytes).unwrap());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark serialization with varying action-stream sizes
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for stream_len in [1024, 64 * 1024, 1024 * 1024] {
        let record = sample_record(stream_len);
        group.bench_with_input(
            BenchmarkId::new("stream_bytes", stream_len),
            &record,
            |b, record| {
                b.iter(|| {
                    black_box(record.serialize());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark mod bitmask name lookup, both directions
fn bench_mods(c: &mut Criterion) {
    let mask = (1 << 0) | (1 << 3) | (1 << 6) | (1 << 14) | (1 << 29);

    c.bench_function("mods_decode", |b| {
        b.iter(|| {
            black_box(mods::decode(black_box(mask)).unwrap());
        });
    });

    c.bench_function("mods_encode", |b| {
        b.iter(|| {
            black_box(mods::encode(black_box(["HD", "DT", "NF", "pf", "v2"])).unwrap());
        });
    });
}

criterion_group!(benches, bench_parse, bench_serialize, bench_mods);

criterion_main!(benches);
