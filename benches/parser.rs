use bibdb::{parse, parse_names, tex_to_unicode, title_case, Diagnostics, Pos};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_bibtex(n_entries: usize) -> String {
    let mut bib = String::with_capacity(n_entries * 200);

    bib.push_str(
        r#"@string{ieee = "IEEE Transactions"}
@string{acm = "ACM Computing Surveys"}

"#,
    );

    for i in 0..n_entries {
        let entry = format!(
            r#"@article{{entry{},
    author = "Author {} and de la Coauthor, {}",
    title = {{Title of {{Paper}} Number {}: A Study}},
    journal = ieee,
    year = {},
    volume = {},
    pages = "{}-{}"
}}

"#,
            i,
            i,
            i,
            i,
            2000 + (i % 25),
            i % 50,
            i * 10,
            i * 10 + 9
        );
        bib.push_str(&entry);
    }

    bib
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for size in [10, 100, 1000] {
        let input = generate_bibtex(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let db = parse(black_box(input)).unwrap();
                black_box(db);
            });
        });
    }

    group.finish();
}

fn bench_fixture_files(c: &mut Criterion) {
    let simple = include_str!("../tests/fixtures/simple.bib");
    let complex = include_str!("../tests/fixtures/complex.bib");

    c.bench_function("parse_simple", |b| {
        b.iter(|| {
            let db = parse(black_box(simple)).unwrap();
            black_box(db);
        });
    });

    c.bench_function("parse_complex", |b| {
        b.iter(|| {
            let db = parse(black_box(complex)).unwrap();
            black_box(db);
        });
    });
}

fn bench_transforms(c: &mut Criterion) {
    let pos = Pos::default();

    c.bench_function("parse_names", |b| {
        b.iter(|| {
            let mut diag = Diagnostics::new();
            let names = parse_names(
                black_box("Charles Louis Xavier Joseph de la Vall{\\'e}e Poussin and Smith, Jr., John and Jean de La Fontaine"),
                &pos,
                &mut diag,
            );
            black_box(names);
        });
    });

    c.bench_function("title_case", |b| {
        b.iter(|| {
            let mut diag = Diagnostics::new();
            let cased = title_case(
                black_box("The {TCP/IP} Guide to Hello World: An {\\'E}tude"),
                &pos,
                &mut diag,
            );
            black_box(cased);
        });
    });

    c.bench_function("tex_to_unicode", |b| {
        b.iter(|| {
            let mut diag = Diagnostics::new();
            let plain = tex_to_unicode(
                black_box("Erd{\\H{o}}s, P\\'al and G\\\"odel, Kurt --- $\\alpha$--$\\omega$"),
                &pos,
                &mut diag,
            );
            black_box(plain);
        });
    });
}

criterion_group!(benches, bench_parsing, bench_fixture_files, bench_transforms);
criterion_main!(benches);
