use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizdrill_core::model::{CorrectAnswer, Question, QuestionKind, Selection};
use quizdrill_core::views::category_stats;

fn make_bank(size: usize) -> (Vec<Question>, HashMap<String, Selection>) {
    let categories = ["history", "science", "art", "math"];
    let mut questions = Vec::with_capacity(size);
    let mut answers = HashMap::new();

    for i in 0..size {
        let options: Vec<String> = (0..4).map(|o| format!("option {o}")).collect();
        let correct_idx = i % 4;
        questions.push(Question {
            id: format!("q{i}"),
            category: categories[i % categories.len()].to_string(),
            kind: QuestionKind::Single,
            text: format!("question {i}"),
            options: options.clone(),
            correct: CorrectAnswer::One(options[correct_idx].clone()),
            explanation: None,
            image: None,
        });
        // Answer every other question, half of them correctly.
        if i % 2 == 0 {
            let picked = if i % 4 == 0 { correct_idx } else { 0 };
            answers.insert(format!("q{i}"), Selection::One(picked));
        }
    }

    (questions, answers)
}

fn bench_grading(c: &mut Criterion) {
    let mut group = c.benchmark_group("grading");

    let (questions, _) = make_bank(100);
    let multiple = Question {
        id: "m".into(),
        category: "math".into(),
        kind: QuestionKind::Multiple,
        text: "pick".into(),
        options: (0..8).map(|o| format!("option {o}")).collect(),
        correct: CorrectAnswer::Many(vec!["option 1".into(), "option 3".into()]),
        explanation: None,
        image: None,
    };
    let selection = Selection::many([1, 3]);

    group.bench_function("single", |b| {
        b.iter(|| black_box(&questions[0]).is_correct(black_box(&Selection::One(0))))
    });

    group.bench_function("multiple_exact_set", |b| {
        b.iter(|| black_box(&multiple).is_correct(black_box(&selection)))
    });

    group.finish();
}

fn bench_category_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_stats");

    for size in [10usize, 100, 1000] {
        let (questions, answers) = make_bank(size);
        group.bench_function(format!("n={size}"), |b| {
            b.iter(|| category_stats(black_box(&questions), black_box(&answers)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grading, bench_category_stats);
criterion_main!(benches);
