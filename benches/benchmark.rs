//! Performance benchmarks for fips-search.
//!
//! Run with: `cargo bench`
//!
//! Each extraction strategy is measured on a page that only it can handle,
//! so the link and text numbers include the cost of the strategies that fall
//! through before them.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fips_search::{classify_html, extract_records_with_options, Options};

const PAGE_URL: &str = "https://www.fips.ru/iiss/search_result.xhtml";

fn table_page(rows: usize) -> String {
    let mut html = String::from(
        "<html><body><table><tr><th>Название</th><th>Авторы</th><th>Номер</th>\
         <th>Заявка</th><th>Правообладатель</th><th>Подана</th><th>Зарегистрирована</th></tr>",
    );
    for i in 0..rows {
        html.push_str(&format!(
            "<tr><td><a href=\"/iiss/document.xhtml?id={i}\">Способ {i}</a></td>\
             <td>Иванов И.И.</td><td>27{i:05}</td><td>2020{i:06}</td><td>ООО Ромашка</td>\
             <td>01.02.2020</td><td>03.04.2021</td></tr>"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn link_page(links: usize) -> String {
    let mut html = String::from("<html><body><ul>");
    for i in 0..links {
        html.push_str(&format!(
            "<li><a href=\"/iiss/document.xhtml?id={i}\">RU {i}</a> Устройство номер {i}</li>"
        ));
    }
    html.push_str("</ul></body></html>");
    html
}

fn text_page(blocks: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..blocks {
        html.push_str(&format!(
            "<p>Патент RU {i} Турбина</p><p>Автор: Петров П.П.</p><p>Номер регистрации: {i}</p>"
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_strategies(c: &mut Criterion) {
    let options = Options {
        max_records: 100,
        ..Options::default()
    };
    let pages = [
        ("table", table_page(50)),
        ("link", link_page(50)),
        ("text", text_page(50)),
    ];

    let mut group = c.benchmark_group("strategies");
    for (name, html) in &pages {
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", name), html, |b, html| {
            b.iter(|| extract_records_with_options(black_box(html), Some(PAGE_URL), &options));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let html = table_page(50);
    c.bench_function("classify_table_page", |b| {
        b.iter(|| classify_html(black_box(&html)));
    });
}

criterion_group!(benches, bench_strategies, bench_classify);
criterion_main!(benches);
