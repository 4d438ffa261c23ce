//! This bench measures highlighting and layering of a large generated sample
//! request document.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{Criterion, criterion_group, criterion_main};
use opbrowse::{domain::layer, highlight};

/// Generates a namespaced request with nested elements, attributes and
/// comments.
fn sample_document(records: usize) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <wd:Hire_Employee_Request xmlns:wd=\"urn:com.workday/bsvc\" wd:version=\"v41.2\">\n",
    );
    for i in 0..records {
        let _ = write!(
            doc,
            "  <!-- Optional: record {i} -->\n  <wd:Worker_Data wd:id=\"{i}\">\n    \
             <wd:ID wd:type=\"Employee_ID\">{i}</wd:ID>\n  </wd:Worker_Data>\n"
        );
    }
    doc.push_str("</wd:Hire_Employee_Request>\n");
    doc
}

fn highlight_document(c: &mut Criterion) {
    let doc = sample_document(2_000);

    c.bench_function("highlight", |b| b.iter(|| highlight(&doc)));

    let regions = highlight(&doc);
    c.bench_function("layer", |b| b.iter(|| layer(&doc, &regions)));
}

criterion_group!(benches, highlight_document);
criterion_main!(benches);
