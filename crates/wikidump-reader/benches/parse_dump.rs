use wikidump_reader::parser::parse_pages_str;

/// Synthetic export with `n` pages of roughly 2KB wikitext each.
fn synthetic_export(n: usize) -> String {
    let body = "'''Lorem''' ipsum [[dolor]] sit amet, {{cite web|url=x}} &amp; more. ".repeat(30);
    let mut xml = String::from("<mediawiki xml:lang=\"en\">\n");
    for i in 0..n {
        xml.push_str(&format!(
            "<page><title>Page {i}</title><ns>0</ns><id>{i}</id>\
             <revision><id>{}</id><text xml:space=\"preserve\">{body}</text></revision></page>\n",
            i + 100_000
        ));
    }
    xml.push_str("</mediawiki>\n");
    xml
}

/// Real sample from BENCH_DATA_DIR if set, else synthetic
fn load_export() -> String {
    match std::env::var("BENCH_DATA_DIR") {
        Ok(dir) => {
            let path = std::path::Path::new(&dir).join("wiki_sample.xml");
            std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
        }
        Err(_) => synthetic_export(2_000),
    }
}

#[divan::bench]
fn parse_pages_bench(bencher: divan::Bencher) {
    let xml = load_export();
    bencher.bench(|| parse_pages_str(&xml).unwrap().len());
}

fn main() {
    divan::main();
}
