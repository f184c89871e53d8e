#![no_main]

//! Persisting a modal into arbitrary URLs round-trips its identifier without
//! growing history.

use libfuzzer_sys::fuzz_target;
use modaly::Registry;
use modaly_dom::{Document, ElementBuilder};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    query: String,
    identifier: String,
}

fuzz_target!(|input: Input| {
    let url = format!("https://example.test/?{}", input.query);
    let Ok(mut doc) = Document::new(&url) else {
        return;
    };
    let body = doc.body();
    let modal = doc.append(
        body,
        ElementBuilder::new("div")
            .attr("data-modaly", input.identifier.as_str())
            .attr("data-modaly-persist", "true"),
    );

    let mut registry = Registry::new();
    registry.init(&mut doc);
    if registry.get(modal).is_none() {
        assert!(input.identifier.is_empty());
        return;
    }

    let history = doc.history().len();
    let _ = registry.open(&mut doc, modal);
    assert_eq!(
        modaly::persisted_identifier(&doc).as_deref(),
        Some(input.identifier.as_str())
    );
    let _ = registry.close(&mut doc, modal);
    assert_eq!(doc.history().len(), history);
    assert!(doc
        .location()
        .query_param(modaly::markup::QUERY_KEY)
        .is_none_or(|value| value != input.identifier));
});
