use criterion::black_box;
use xwords_gen::{
    crossword::Crossword,
    fill::propagate::Propagator,
    puzzle::Puzzle,
};

use criterion::{criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    let crossword = Crossword::new(String::from(
        "
____*____*_____
____*____*_____
_________*_____
___*___*___*___
**____*________
______*_____***
_____*____*____
___*_______*___
____*____*_____
***_____*______
________*____**
___*___*___*___
_____*_________
_____*____*____
_____*____*____
",
    ))
    .expect("failed to parse structure");

    let mut words = vec![];
    for length in 3..=15 {
        for a in b'A'..=b'Z' {
            for b in b'A'..=b'E' {
                let word: String = (0..length)
                    .map(|index| if index % 2 == 0 { a as char } else { b as char })
                    .collect();
                words.push(word);
            }
        }
    }
    let puzzle = Puzzle::from_crossword(&crossword, words);

    c.bench_function("ac3_15x15", |b| {
        b.iter(|| {
            let mut propagator = Propagator::new(black_box(&puzzle));
            propagator.enforce_node_consistency();
            propagator.ac3(None)
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
