#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::print_stdout
)]

/// Comparison benchmarks: urlquery vs url crate's `form_urlencoded`
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use url::form_urlencoded;
use urlquery::{QueryParams, Url};

const SIMPLE_QUERY: &str = "q=rust&page=2&limit=50";
const ENCODED_QUERY: &str = "name=Fran%C3%A7ois&city=S%C3%A3o+Paulo&tags=a%2Cb%2Cc\
                             &bar=%F0%9D%95%A6%F0%9D%95%9F%F0%9D%95%9A&url=http%3A%2F%2Fexample.com%2F%3Fx%3D1";

fn bench_parse_simple_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_simple");

    group.bench_function("urlquery", |b| {
        b.iter(|| QueryParams::parse(black_box(SIMPLE_QUERY)));
    });

    group.bench_function("form_urlencoded", |b| {
        b.iter(|| {
            form_urlencoded::parse(black_box(SIMPLE_QUERY.as_bytes()))
                .into_owned()
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

fn bench_parse_encoded_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_encoded");

    group.bench_function("urlquery", |b| {
        b.iter(|| QueryParams::parse(black_box(ENCODED_QUERY)));
    });

    group.bench_function("form_urlencoded", |b| {
        b.iter(|| {
            form_urlencoded::parse(black_box(ENCODED_QUERY.as_bytes()))
                .into_owned()
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

fn bench_serialize_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let params = QueryParams::parse(ENCODED_QUERY);
    let pairs: Vec<(String, String)> = params.clone().into_iter().collect();

    group.bench_function("urlquery", |b| {
        b.iter(|| black_box(&params).to_query_string());
    });

    group.bench_function("form_urlencoded", |b| {
        b.iter(|| {
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(black_box(&pairs))
                .finish()
        });
    });

    group.finish();
}

fn bench_url_query_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_query_ops");
    let base = Url::parse(&format!("http://example.com/search?{ENCODED_QUERY}#top")).unwrap();

    group.bench_function("query_first_read", |b| {
        b.iter(|| Url::parse(black_box(base.as_str())).unwrap().query().len());
    });

    group.bench_function("update_query", |b| {
        b.iter(|| {
            black_box(&base)
                .update_query([("page", "3"), ("name", "Zoë")])
                .unwrap()
        });
    });

    group.bench_function("with_query", |b| {
        b.iter(|| black_box(&base).with_query([("q", "rust lang")]).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_simple_all,
    bench_parse_encoded_all,
    bench_serialize_all,
    bench_url_query_ops
);

criterion_main!(benches);
