use tablestakes::cards::{evaluator, Deck};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_a_seven_card_hand,
        shuffling_and_dealing_a_table,
}

fn evaluating_a_seven_card_hand(c: &mut criterion::Criterion) {
    let mut deck = Deck::new();
    let cards: Vec<_> = (0..7).map(|_| deck.draw().unwrap()).collect();
    c.bench_function("evaluate a 7-card hand", |b| {
        b.iter(|| evaluator::evaluate(&cards))
    });
}

fn shuffling_and_dealing_a_table(c: &mut criterion::Criterion) {
    c.bench_function("shuffle a deck and deal two hole cards to six seats", |b| {
        b.iter(|| {
            let mut deck = Deck::new();
            let hole: Vec<_> = (0..6).map(|_| (deck.draw(), deck.draw())).collect();
            hole
        })
    });
}
