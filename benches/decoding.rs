use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use record_xml::{from_str, to_string_pretty};

fn document(records: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<root>\n");
    for i in 0..records {
        xml.push_str(&format!(
            r#"  <record index="{i}">
    <F C="TI" L="Title"><T>Record number {i}.</T></F>
    <F C="AB" L="Abstract"><T>First line;<BR/>second line<BR/>third line.</T></F>
    <F C="KW" L="Keywords"><D><T>alpha</T><T>beta</T>gamma-{i}</D></F>
  </record>
"#
        ));
    }
    xml.push_str("</root>\n");
    xml
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [10, 100, 1000].iter() {
        let xml = document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &xml, |b, xml| {
            b.iter(|| from_str(black_box(xml)))
        });
    }
    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_json");

    for size in [10, 100, 1000].iter() {
        let records = from_str(&document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| to_string_pretty(black_box(records)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_decode, benchmark_encode);
criterion_main!(benches);
