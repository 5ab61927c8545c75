use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deposit_xml::parser::{DepositParser, ParserKind};

const TYPES: [&str; 6] = ["demand", "urgent", "settlement", "accumulation", "savings", "metal"];
const COUNTRIES: [&str; 5] = ["US", "DE", "CH", "JP", "GB"];

fn generate_test_deposits(num_deposits: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<deposits xmlns:bank="www.example.org/xmlns/bank" xmlns:fin="www.example.org/xmlns/financial">"#,
    );

    for i in 0..num_deposits {
        xml.push_str(&format!(
            r#"
    <deposit id="D-{}" type="{}" bank:name="Bank {}" country="{}">
        <depositor>Depositor {}</depositor>
        <account-id>{}</account-id>
        <fin:amount-on-deposit>{}.{:02}</fin:amount-on-deposit>
        <fin:interest>{}.{:02}</fin:interest>
        <time-constraint>{}</time-constraint>
    </deposit>"#,
            i,
            TYPES[i % TYPES.len()],
            i % 17,
            COUNTRIES[i % COUNTRIES.len()],
            i,
            100_000 + i,
            (i * 7919) % 1_000_000,
            i % 100,
            i % 10,
            (i * 13) % 100,
            (i * 31) % 3650
        ));
    }

    xml.push_str("\n</deposits>\n");
    xml
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("deposit_parsers");

    for num_deposits in [100, 1_000, 10_000] {
        let xml = generate_test_deposits(num_deposits);

        group.throughput(Throughput::Bytes(xml.len() as u64));
        for kind in ParserKind::ALL {
            let parser = kind.parser();
            group.bench_with_input(
                BenchmarkId::new(kind.as_str(), num_deposits),
                &xml,
                |b, xml| {
                    b.iter(|| {
                        let db = parser.parse_str(black_box(xml)).unwrap();
                        black_box(db.len());
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
