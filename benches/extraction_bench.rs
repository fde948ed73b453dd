use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parasent::{
    filtering::{Admission, DedupPolicy, DedupSet, QualityFilter},
    lang::LangPair,
    processing::Collector,
    sentence::SentencePair,
    sources::{Columns, Corpus, RawRecord, DEFAULT_THRESHOLD},
};

const NB_RECORDS: usize = 10_000;

fn scored_records() -> Vec<RawRecord> {
    (0..NB_RECORDS)
        .map(|i| RawRecord::Scored {
            score: 2.0 - i as f64 / NB_RECORDS as f64,
            first: format!("sentence number {}", i),
            second: format!("numero di frase {}", i % (NB_RECORDS / 2)),
        })
        .collect()
}

// filter and collect every record, a fresh dedup set per iteration
pub fn admit_and_collect(c: &mut Criterion) {
    let records = scored_records();
    let pair = LangPair::new("en", "it");
    let columns = Columns::canonical(&pair);
    let filter = QualityFilter::new(Corpus::WikiMatrix, DEFAULT_THRESHOLD);

    c.bench_function("admit and collect", |b| {
        b.iter(|| {
            let mut dedup = DedupSet::new(DedupPolicy::BothSides);
            let mut collector =
                Collector::new(pair.clone(), NB_RECORDS, Vec::<SentencePair>::new());
            for record in &records {
                let Some(candidate) = columns.project(record, &pair) else {
                    continue;
                };
                match filter.admit(&candidate, &pair, &mut dedup) {
                    Admission::Accepted(p) => {
                        collector.offer(p).unwrap();
                    }
                    Admission::Rejected(_) => (),
                    Admission::Truncated => break,
                }
            }
            black_box(collector.state().accepted())
        })
    });
}

pub fn keyed_projection(c: &mut Criterion) {
    let columns = Columns::from_header(["talkid", "en", "ar", "it", "de", "fr"]);
    let record = RawRecord::Keyed(
        ["1", "Hello", "مرحبا", "Ciao", "Hallo", "Bonjour"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let pairs: Vec<LangPair> = ["ar", "it", "de", "fr"]
        .iter()
        .map(|t| LangPair::new("en", t))
        .collect();

    c.bench_function("keyed projection", |b| {
        b.iter(|| {
            for pair in &pairs {
                black_box(columns.project(black_box(&record), pair));
            }
        })
    });
}

criterion_group!(benches, admit_and_collect, keyed_projection);
criterion_main!(benches);
