#![no_main]

//! Arbitrary operation sequences keep class state, `aria-hidden`, and the
//! listener table consistent.

use libfuzzer_sys::fuzz_target;
use modaly::Registry;
use modaly_dom::{Document, DomEvent, ElementBuilder, Key, NodeId};

#[derive(Debug, arbitrary::Arbitrary)]
enum Op {
    Open(u8),
    Close(u8),
    Toggle(u8),
    Click(u8),
    Escape(u8),
    Focus(u8),
    Destroy(u8),
    Register(u8),
}

fn build() -> (Document, Vec<NodeId>, Vec<NodeId>) {
    let mut doc = Document::default();
    let body = doc.body();
    let mut roots = Vec::new();
    for id in ["a", "b", "c"] {
        doc.append(body, ElementBuilder::new("button").attr("data-modaly-trigger", id));
        roots.push(
            doc.append(
                body,
                ElementBuilder::new("div")
                    .attr("data-modaly", id)
                    .attr("data-modaly-persist", "true")
                    .child(ElementBuilder::new("input"))
                    .child(ElementBuilder::new("button").attr("data-modaly-close", "")),
            ),
        );
    }
    let nodes = doc.descendants(doc.root());
    (doc, roots, nodes)
}

fuzz_target!(|ops: Vec<Op>| {
    let (mut doc, roots, nodes) = build();
    let mut registry = Registry::new();
    registry.init(&mut doc);

    let root_at = |i: u8| roots[usize::from(i) % roots.len()];
    let node_at = |i: u8| nodes[usize::from(i) % nodes.len()];

    for op in ops.iter().take(256) {
        match *op {
            Op::Open(i) => {
                let _ = registry.open(&mut doc, root_at(i));
            }
            Op::Close(i) => {
                let _ = registry.close(&mut doc, root_at(i));
            }
            Op::Toggle(i) => {
                let _ = registry.toggle(&mut doc, root_at(i));
            }
            Op::Click(i) => {
                registry.handle_event(&mut doc, &DomEvent::click(node_at(i)));
            }
            Op::Escape(i) => {
                registry.handle_event(&mut doc, &DomEvent::key_down(node_at(i), Key::Escape));
            }
            Op::Focus(i) => {
                doc.focus(node_at(i));
            }
            Op::Destroy(i) => {
                let _ = registry.destroy(&mut doc, root_at(i));
            }
            Op::Register(i) => {
                let _ = registry.register(&mut doc, root_at(i));
            }
        }
        for &root in &roots {
            match registry.get(root) {
                Some(instance) => {
                    let open = instance.is_open(&doc);
                    let hidden = doc.attribute(root, "aria-hidden");
                    assert_eq!(hidden, Some(if open { "false" } else { "true" }));
                }
                None => assert!(!doc.has_attribute(root, "role")),
            }
        }
    }

    assert!(doc.dispatched().is_empty());

    let listeners = registry.listeners().len();
    let live: usize = roots
        .iter()
        .filter_map(|&r| registry.get(r))
        .map(|i| registry.listeners().for_modal(i.element()).count())
        .sum();
    assert_eq!(listeners, live);
});
