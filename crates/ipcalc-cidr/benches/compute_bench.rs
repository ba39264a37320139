use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ipcalc_cidr::{classify_ipv6, compute_ipv4, compute_ipv6};
use std::net::Ipv6Addr;

fn bench_compute(c: &mut Criterion) {
    c.bench_function("compute_ipv4_prefix", |b| {
        b.iter(|| compute_ipv4(black_box("192.168.1.10"), black_box(Some("24"))))
    });

    c.bench_function("compute_ipv4_shorthand_netmask", |b| {
        b.iter(|| compute_ipv4(black_box("172.16"), black_box(Some("255.240.0.0"))))
    });

    c.bench_function("compute_ipv6_prefix", |b| {
        b.iter(|| compute_ipv6(black_box("2001:db8:abcd:12::1/52"), None))
    });
}

fn bench_classify(c: &mut Criterion) {
    // Falls through most of the table before matching
    let multicast: Ipv6Addr = "ff02::1".parse().unwrap();

    c.bench_function("classify_ipv6_multicast", |b| {
        b.iter(|| classify_ipv6(black_box(multicast)))
    });
}

criterion_group!(benches, bench_compute, bench_classify);
criterion_main!(benches);
