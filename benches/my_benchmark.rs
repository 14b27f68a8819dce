use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use huffman_text::frequency::sorted_frequencies;
use huffman_text::{HuffmanCoding, HuffmanTree};

/// ascii text with a skewed, english-like distribution
fn generate_text(size: usize) -> Vec<u8> {
    let sample = b"Once upon a time there lived a king and queen who had no children; \
and this they lamented very much. But one day as the queen was walking by the side \
of the river, a little fish lifted its head out of the water.\n";
    sample.iter().copied().cycle().take(size).collect()
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    for &size in &[1024, 65536] {
        let text = generate_text(size);
        group.bench_with_input(BenchmarkId::new("build", size), &text, |b, text| {
            b.iter(|| {
                let entries = sorted_frequencies(text).unwrap();
                black_box(HuffmanTree::build(&entries).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for &size in &[1024, 65536] {
        let text = generate_text(size);
        let coding = HuffmanCoding::from_bytes(&text).unwrap();
        let encoded = coding.encode_bytes(&text).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", size), &text, |b, text| {
            b.iter(|| black_box(coding.encode_bytes(text).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(coding.decode_bytes(encoded)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tree, bench_codec);
criterion_main!(benches);
