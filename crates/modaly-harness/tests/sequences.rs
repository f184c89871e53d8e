#![forbid(unsafe_code)]

//! Property tests over arbitrary host interaction sequences.

use modaly_dom::Key;
use modaly_harness::strategies::{Step, class_value, flag_value, steps};
use modaly_harness::{ModalSpec, Page, PageBuilder};
use proptest::prelude::*;

fn three_modals() -> Page {
    PageBuilder::new()
        .modal(ModalSpec::new("a").persist().header(""))
        .modal(ModalSpec::new("b").persist().close_on_escape("false"))
        .modal(ModalSpec::new("c").close_on_outside("false").autofocus())
        .build()
        .expect("page")
}

fn check_consistency(page: &Page) -> Result<(), TestCaseError> {
    for (index, m) in page.modals.iter().enumerate() {
        let open = page.is_open(index);
        let hidden = page.doc.attribute(m.root, "aria-hidden");
        prop_assert_eq!(hidden, Some(if open { "false" } else { "true" }));
        prop_assert!(page.doc.has_class(m.root, "modaly"));
    }
    if let Some(persisted) = page.persisted() {
        // Only a persisting modal ever writes the key, and it was open when
        // it did.
        prop_assert!(persisted == "a" || persisted == "b");
    }
    Ok(())
}

proptest! {
    #[test]
    fn aria_hidden_tracks_open_state(seq in steps(3, 40)) {
        let mut page = three_modals();
        page.init();
        for step in &seq {
            page.apply(step);
            check_consistency(&page)?;
        }
    }

    #[test]
    fn toggle_pair_is_identity(seq in steps(3, 20), index in 0usize..3) {
        let mut page = three_modals();
        page.init();
        for step in &seq {
            page.apply(step);
        }
        let before = page.is_open(index);
        page.apply(&Step::Toggle(index));
        page.apply(&Step::Toggle(index));
        prop_assert_eq!(page.is_open(index), before);
    }

    #[test]
    fn escape_never_closes_opted_out_modal(seq in steps(3, 30)) {
        let mut page = three_modals();
        page.init();
        page.apply(&Step::Open(1));
        for step in seq.iter().filter(|s| matches!(s, Step::Press(..) | Step::ClickPanel(_))) {
            page.apply(step);
        }
        prop_assert!(page.is_open(1));
    }

    #[test]
    fn destroy_after_any_sequence_strips_markers(seq in steps(3, 30)) {
        let mut page = three_modals();
        page.init();
        for step in &seq {
            page.apply(step);
        }
        let roots: Vec<_> = page.modals.iter().map(|m| m.root).collect();
        for root in roots {
            page.registry.destroy(&mut page.doc, root).expect("destroy");
            prop_assert!(page.doc.classes(root).is_empty());
            for attr in ["role", "aria-modal", "aria-hidden", "aria-labelledby", "aria-describedby"] {
                prop_assert!(!page.doc.has_attribute(root, attr));
            }
        }
        prop_assert!(page.registry.listeners().is_empty());
        prop_assert!(page.registry.is_empty());
    }

    #[test]
    fn markup_flags_resolve_like_config(
        persist in flag_value(),
        escape in flag_value(),
        outside in flag_value(),
        open_class in class_value(),
    ) {
        let mut spec = ModalSpec::new("m");
        spec.persist = persist.clone();
        spec.close_on_escape = escape.clone();
        spec.close_on_outside = outside.clone();
        spec.open_class = open_class.clone();
        let mut page = PageBuilder::new().modal(spec).build().expect("page");
        page.init();
        let root = page.modal(0).root;
        let config = page.registry.get(root).expect("instance").config().clone();

        prop_assert_eq!(config.persist, persist.as_deref() == Some("true"));
        prop_assert_eq!(config.close_on_escape, escape.as_deref() != Some("false"));
        prop_assert_eq!(config.close_on_outside_click, outside.as_deref() != Some("false"));
        let expected_open = open_class.filter(|c| !c.is_empty()).unwrap_or_else(|| "modaly-open".into());
        prop_assert_eq!(&config.open_class, &expected_open);

        page.press(page.outside, Key::Escape);
        prop_assert!(!page.is_open(0));
    }
}
