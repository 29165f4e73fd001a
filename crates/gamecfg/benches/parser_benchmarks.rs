//! Parser and loading benchmarks.
//!
//! Measures tokenizing, mapping and registry loads across table sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gamecfg::tables::EnemyConfig;
use gamecfg::{ConfigRecord, ConfigRegistry, CsvParser, MemoryProvider, RecordMapper};

const HEADER: &str = "ID,Name,Description,Health,Speed,Type,Boss\n\
                      id,name,description,health,speed,enemyType,isBoss\n\
                      int,string,string,int,float,EnemyType,bool\n";

/// Generate an enemy table with the specified number of rows.
fn generate_enemy_table(rows: usize) -> String {
    let mut data = String::from(HEADER);
    let kinds = ["Normal", "Fast", "Tank", "Ranged", "Boss", "Elite"];

    for row in 0..rows {
        data.push_str(&format!(
            "{},Enemy_{},\"Spawns in wave {}, lane {}\",{},{:.2},{},{}\n",
            row,
            row,
            row % 20,
            row % 3,
            50 + row % 500,
            row as f64 * 0.25,
            kinds[row % kinds.len()],
            if row % 50 == 0 { "true" } else { "false" },
        ));
    }

    data
}

/// Benchmark tokenizing documents of various sizes.
fn bench_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_enemy_table(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = CsvParser::new();
            b.iter(|| black_box(parser.parse_document(data)))
        });
    }

    group.finish();
}

/// Benchmark mapping parsed rows onto typed records.
fn bench_map_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_typed");
    let descriptor = EnemyConfig::descriptor();

    for rows in [100, 1_000, 10_000].iter() {
        let doc = CsvParser::new().parse_document(&generate_enemy_table(*rows));
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &doc, |b, doc| {
            b.iter(|| black_box(RecordMapper::map(doc.field_names(), &doc.data_rows, &descriptor)))
        });
    }

    group.finish();
}

/// Benchmark a full registry load including hashing and caching.
fn bench_registry_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_load");

    for rows in [100, 1_000, 10_000].iter() {
        let provider = MemoryProvider::new()
            .with_resource("Configs/EnemyConfig", generate_enemy_table(*rows));
        let mut registry = ConfigRegistry::new(provider);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_function(BenchmarkId::new("rows", rows), |b| {
            b.iter(|| black_box(registry.load_table("EnemyConfig").unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_document, bench_map_typed, bench_registry_load);
criterion_main!(benches);
