use chatspan::core::message::Message;
use chatspan::core::users::UserSet;
use chatspan::ui::render::{render_message, RenderConfig};
use chatspan::ui::theme::Theme;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn make_messages(n: usize, base: &str) -> Vec<Message> {
    (0..n)
        .map(|i| {
            let sender = if i % 2 == 0 { "alice" } else { "bob" };
            Message::new(sender, base)
        })
        .collect()
}

fn redraw(messages: &[Message], theme: &Theme, users: &UserSet, width: usize) {
    let cfg = RenderConfig::new(theme, users, width);
    for msg in messages {
        let _ = render_message(msg, &cfg);
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let base = "lorem ipsum *dolor* sit amet @alice :wave: consectetur \
                adipiscing elit sed do `eiusmod tempor` incididunt ut \
                [labore](https://example.com) et dolore magna aliqua";
    let theme = Theme::dark_default();
    let users: UserSet = ["alice", "bob"].into_iter().collect();

    for &count in &[100usize, 400usize] {
        let messages = make_messages(count, base);
        let mut group = c.benchmark_group(format!("render_pipeline_msgs{}", count));
        group.throughput(Throughput::Elements(count as u64));

        for &width in &[40usize, 120usize] {
            group.bench_function(BenchmarkId::new("redraw", width), |b| {
                b.iter(|| redraw(&messages, &theme, &users, width))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
