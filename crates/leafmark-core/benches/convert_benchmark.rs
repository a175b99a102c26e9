//! Benchmarks comparing Leafmark conversion with pulldown-cmark's HTML output
//!
//! Run with: cargo bench -p leafmark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use leafmark_core::{markdown_to_html, segment, tokenize};
use pulldown_cmark::{html, Options, Parser as MdParser};

/// Sample document using every block and inline construct of the dialect
const SAMPLE: &str = r#"# Benchmark Document

This is a paragraph with _emphasis_, **strong text**, and `inline code`.
It demonstrates the basic capabilities of the format.

## Lists

- First item with some content
- Second item with more content
- Third item concluding the list

1. Step one of the process
2. Step two continues
3. Step three completes

## Code Example

```
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

## Quote

> The best code is no code at all.
> Every line of code you write is a liability.

## Links

Read [the guide](https://example.com/guide) and look at ![the diagram](https://example.com/diagram.png).

End of document.
"#;

fn pulldown_html(input: &str) -> String {
    let parser = MdParser::new_ext(input, Options::empty());
    let mut out = String::with_capacity(input.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("leafmark", |b| {
        b.iter(|| {
            let html = markdown_to_html(black_box(SAMPLE)).unwrap();
            black_box(html.len())
        })
    });

    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| {
            let html = pulldown_html(black_box(SAMPLE));
            black_box(html.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20].iter() {
        let content: String = SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("leafmark", size), &content, |b, content| {
            b.iter(|| {
                let html = markdown_to_html(black_box(content)).unwrap();
                black_box(html.len())
            })
        });

        group.bench_with_input(
            BenchmarkId::new("pulldown_cmark", size),
            &content,
            |b, content| {
                b.iter(|| {
                    let html = pulldown_html(black_box(content));
                    black_box(html.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let inline =
        "This has _emphasis_, **strong**, `code`, [link](https://example.com), and ![img](a.png).";

    group.bench_function("segment", |b| {
        b.iter(|| black_box(segment(black_box(SAMPLE)).len()))
    });

    group.bench_function("tokenize", |b| {
        b.iter(|| black_box(tokenize(black_box(inline)).unwrap().len()))
    });

    group.finish();
}

criterion_group!(benches, bench_convert, bench_scaling, bench_stages);
criterion_main!(benches);
