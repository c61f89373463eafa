use criterion::{Criterion, criterion_group, criterion_main};
use ticket::{ModuleMatrix, PseudoQrRenderer, TicketRenderer, generate_reservation_id};

const PAYLOAD: &str = "STREAMLINE-CINEMA|SC-M5QM8PC0-0K3ZP|Inception|2025-01-10|18:00|A1,A2,A3";

fn bench_matrix(c: &mut Criterion) {
    c.bench_function("ticket/module_matrix", |b| {
        b.iter(|| ModuleMatrix::from_payload(PAYLOAD));
    });
}

fn bench_render(c: &mut Criterion) {
    let renderer = PseudoQrRenderer::default();
    c.bench_function("ticket/render_data_uri", |b| {
        b.iter(|| renderer.render(PAYLOAD));
    });
}

fn bench_reservation_id(c: &mut Criterion) {
    c.bench_function("ticket/generate_reservation_id", |b| {
        b.iter(|| generate_reservation_id().unwrap());
    });
}

criterion_group!(benches, bench_matrix, bench_render, bench_reservation_id);
criterion_main!(benches);
