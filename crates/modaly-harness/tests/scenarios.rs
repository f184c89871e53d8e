#![forbid(unsafe_code)]

//! Multi-modal and bootstrap scenarios.

use modaly::ModalError;
use modaly_dom::ElementBuilder;
use modaly_harness::{ModalSpec, PageBuilder, render_markup};
use pretty_assertions::assert_eq;

#[test]
fn closing_one_modal_keeps_anothers_location_value() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a").persist())
        .modal(ModalSpec::new("b").persist())
        .build()
        .expect("page");
    page.init();
    let (a, b) = (page.modal(0).clone(), page.modal(1).clone());

    page.click(a.triggers[0]);
    page.click(b.triggers[0]);
    assert_eq!(page.persisted().as_deref(), Some("b"));

    page.click(a.close.expect("close"));
    assert_eq!(page.persisted().as_deref(), Some("b"));
    assert!(page.is_open(1));

    page.click(b.close.expect("close"));
    assert_eq!(page.persisted(), None);
}

#[test]
fn unknown_and_empty_deep_links_are_ignored() {
    for url in [
        "https://example.test/?modaly=missing",
        "https://example.test/?modaly=",
        "https://example.test/?other=a",
    ] {
        let mut page = PageBuilder::new()
            .url(url)
            .modal(ModalSpec::new("a"))
            .build()
            .expect("page");
        let report = page.init().expect("init");
        assert_eq!(report.restored, None, "{url}");
        assert!(!page.is_open(0), "{url}");
    }
}

#[test]
fn deep_link_replays_after_navigation() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a"))
        .modal(ModalSpec::new("b"))
        .build()
        .expect("page");
    page.init();
    page.doc
        .navigate("https://example.test/page?modaly=b")
        .expect("navigate");

    let restored = page.registry.restore_from_location(&mut page.doc);
    assert_eq!(restored, Some(page.modal(1).root));
    assert!(page.is_open(1));
}

#[test]
fn content_loaded_bootstraps_once() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a"))
        .build()
        .expect("page");
    assert_eq!(page.load(), 1);
    assert_eq!(page.load(), 0);
    assert!(page.init().is_none());
    assert_eq!(page.registry.len(), 1);

    let trigger = page.modal(0).triggers[0];
    assert_eq!(page.click(trigger), 1);
    assert!(page.is_open(0));
}

#[test]
fn many_triggers_one_modal() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a").triggers(3))
        .build()
        .expect("page");
    page.init();
    let m = page.modal(0).clone();
    for trigger in &m.triggers {
        page.registry.close(&mut page.doc, m.root).expect("close");
        page.click(*trigger);
        assert!(page.is_open(0));
    }
}

#[test]
fn escape_dismisses_every_open_modal() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a"))
        .modal(ModalSpec::new("b"))
        .build()
        .expect("page");
    page.init();
    let (a, b) = (page.modal(0).root, page.modal(1).root);
    page.registry.open(&mut page.doc, a).expect("open");
    page.registry.open(&mut page.doc, b).expect("open");
    assert_eq!(page.registry.open_modals(&page.doc), vec![a, b]);

    let outside = page.outside;
    page.press(outside, modaly_dom::Key::Escape);
    assert!(page.registry.open_modals(&page.doc).is_empty());
}

#[test]
fn register_rejections() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a"))
        .build()
        .expect("page");
    page.init();
    let root = page.modal(0).root;
    assert_eq!(
        page.registry.register(&mut page.doc, root).err(),
        Some(ModalError::AlreadyRegistered(root))
    );

    let body = page.doc.body();
    let blank = page.doc.append(body, ElementBuilder::new("div"));
    assert_eq!(
        page.registry.register(&mut page.doc, blank).err(),
        Some(ModalError::MissingIdentifier(blank))
    );
    assert!(page.registry.get(blank).is_none());
}

#[test]
fn late_registration_wires_on_demand() {
    let mut page = PageBuilder::new().build().expect("page");
    page.init();
    let body = page.doc.body();
    let trigger = page.doc.append(
        body,
        ElementBuilder::new("a")
            .attr("href", "#late")
            .attr("data-modaly-trigger", "late"),
    );
    let late = page
        .doc
        .append(body, ElementBuilder::new("div").attr("data-modaly", "late"));

    page.registry.register(&mut page.doc, late).expect("register");
    page.click(trigger);
    assert_eq!(page.registry.is_open(&page.doc, late), Ok(true));
}

#[test]
fn destroy_twice_is_rejected() {
    let mut page = PageBuilder::new()
        .modal(ModalSpec::new("a"))
        .build()
        .expect("page");
    page.init();
    let root = page.modal(0).root;
    page.registry.destroy(&mut page.doc, root).expect("destroy");
    assert_eq!(
        page.registry.destroy(&mut page.doc, root),
        Err(ModalError::NotRegistered(root))
    );
}

#[test]
fn annotated_markup() {
    let mut page = PageBuilder::new()
        .modal(
            ModalSpec::new("terms")
                .header("")
                .description("")
                .without_close_control(),
        )
        .build()
        .expect("page");
    page.init();
    let root = page.modal(0).root;

    assert_eq!(
        render_markup(&page.doc, root),
        concat!(
            "<div class=\"modaly\" data-modaly=\"terms\" role=\"dialog\" aria-modal=\"true\" ",
            "aria-hidden=\"true\" aria-labelledby=\"modaly-header-terms\" ",
            "aria-describedby=\"modaly-desc-terms\">\n",
            "  <div class=\"panel\">\n",
            "    <h2 data-modaly-header=\"\" id=\"modaly-header-terms\">\n",
            "    <p data-modaly-description=\"\" id=\"modaly-desc-terms\">\n",
            "    <input>\n",
        )
    );
}
