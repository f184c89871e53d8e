#![forbid(unsafe_code)]

//! Proptest strategies for markup flags and host interaction sequences.

use modaly_dom::Key;
use proptest::prelude::*;

/// Values seen in the wild for boolean-ish flag attributes.
pub fn flag_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("true".to_owned())),
        Just(Some("false".to_owned())),
        Just(Some(String::new())),
        Just(Some("FALSE".to_owned())),
        "[a-z0-9]{1,6}".prop_map(Some),
    ]
}

/// Class attribute values, including empty.
pub fn class_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), "x-[a-z]{1,8}".prop_map(Some)]
}

/// One host action against a page with `modals` modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Open(usize),
    Close(usize),
    Toggle(usize),
    ClickTrigger(usize),
    ClickClose(usize),
    ClickRoot(usize),
    ClickPanel(usize),
    ClickOutside,
    Press(usize, Key),
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Escape),
        Just(Key::Enter),
        Just(Key::Tab),
        any::<char>().prop_map(Key::Char),
    ]
}

/// Sequences of up to `len` steps over `modals` modals.
pub fn steps(modals: usize, len: usize) -> impl Strategy<Value = Vec<Step>> {
    let m = 0..modals.max(1);
    let step = prop_oneof![
        m.clone().prop_map(Step::Open),
        m.clone().prop_map(Step::Close),
        m.clone().prop_map(Step::Toggle),
        m.clone().prop_map(Step::ClickTrigger),
        m.clone().prop_map(Step::ClickClose),
        m.clone().prop_map(Step::ClickRoot),
        m.clone().prop_map(Step::ClickPanel),
        Just(Step::ClickOutside),
        (m, key()).prop_map(|(i, k)| Step::Press(i, k)),
    ];
    proptest::collection::vec(step, 0..len)
}

impl crate::Page {
    /// Apply one [`Step`]. Modal indices are taken modulo the modal count.
    pub fn apply(&mut self, step: &Step) {
        if self.modals.is_empty() && *step != Step::ClickOutside {
            return;
        }
        let count = self.modals.len().max(1);
        let slot = |i: usize| i % count;
        match step {
            Step::Open(i) => {
                let root = self.modals[slot(*i)].root;
                let _ = self.registry.open(&mut self.doc, root);
            }
            Step::Close(i) => {
                let root = self.modals[slot(*i)].root;
                let _ = self.registry.close(&mut self.doc, root);
            }
            Step::Toggle(i) => {
                let root = self.modals[slot(*i)].root;
                let _ = self.registry.toggle(&mut self.doc, root);
            }
            Step::ClickTrigger(i) => {
                if let Some(&t) = self.modals[slot(*i)].triggers.first() {
                    self.click(t);
                }
            }
            Step::ClickClose(i) => {
                if let Some(c) = self.modals[slot(*i)].close {
                    self.click(c);
                }
            }
            Step::ClickRoot(i) => {
                let root = self.modals[slot(*i)].root;
                self.click(root);
            }
            Step::ClickPanel(i) => {
                let panel = self.modals[slot(*i)].panel;
                self.click(panel);
            }
            Step::ClickOutside => {
                let outside = self.outside;
                self.click(outside);
            }
            Step::Press(i, key) => {
                let input = self.modals[slot(*i)].input;
                self.press(input, key.clone());
            }
        }
    }
}
