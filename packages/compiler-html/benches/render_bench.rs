use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_compiler_html::{compile_article, compile_block, CompileOptions};
use folio_model::{default_block, Article, Block, BlockKind, Hypertext};

fn render_body_with_hypertext(c: &mut Criterion) {
    let block = Block::Body {
        content: vec!["Hotcake helps salons grow. Book with Hotcake today.".repeat(20)],
        hypertext: Some(vec![
            Hypertext {
                keyword: "Hotcake".to_string(),
                href: "https://hotcakeapp.com".to_string(),
            },
            Hypertext {
                keyword: "salons".to_string(),
                href: "https://hotcakeapp.com/salons".to_string(),
            },
        ]),
    };

    c.bench_function("render_body_with_hypertext", |b| {
        b.iter(|| compile_block(black_box(&block), CompileOptions::default()))
    });
}

fn render_large_article(c: &mut Criterion) {
    let mut article = Article::with_id("large");
    article.title = "Large article".to_string();
    for _ in 0..50 {
        for kind in BlockKind::ALL {
            article.body.push(default_block(kind));
        }
    }

    c.bench_function("render_large_article", |b| {
        b.iter(|| compile_article(black_box(&article), CompileOptions::default()))
    });
}

criterion_group!(benches, render_body_with_hypertext, render_large_article);
criterion_main!(benches);
