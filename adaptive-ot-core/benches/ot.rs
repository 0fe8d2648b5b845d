use adaptive_ot_core::{
    adaptive::{Receiver, ReceiverConfig, Sender, SenderConfig},
    group::SchnorrGroup,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn configs() -> (SenderConfig, ReceiverConfig) {
    (
        SenderConfig::builder()
            .group(SchnorrGroup::modp_1024())
            .build()
            .unwrap(),
        ReceiverConfig::builder()
            .group(SchnorrGroup::modp_1024())
            .build()
            .unwrap(),
    )
}

fn grid(m: usize) -> Vec<Vec<Vec<u8>>> {
    (0..m)
        .map(|i| {
            (0..m)
                .map(|j| format!("MSG(i={i},j={j})").into_bytes())
                .collect()
        })
        .collect()
}

fn setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive_ot/setup");
    for m in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, &m| {
            let messages = grid(m);
            b.iter(|| {
                let (sender_config, _) = configs();
                let sender = Sender::new(sender_config);
                black_box(sender.setup(&messages).unwrap())
            })
        });
    }
}

fn query(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive_ot/query");
    for m in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, &m| {
            let messages = grid(m);
            let (sender_config, receiver_config) = configs();
            let (public_setup, mut sender) =
                Sender::new(sender_config).setup(&messages).unwrap();
            let mut receiver = Receiver::new(receiver_config)
                .ingest_setup(public_setup)
                .unwrap();

            b.iter(|| {
                let (payload, session) = sender.begin_query().unwrap();
                let (request, pending) = receiver.begin_query(m - 1, 0, payload).unwrap();
                let response = session.transfer(request).unwrap();
                black_box(pending.finish(response).unwrap())
            })
        });
    }
}

criterion_group! {
    name = adaptive_ot_benches;
    config = Criterion::default().sample_size(10);
    targets = setup, query
}

criterion_main!(adaptive_ot_benches);
