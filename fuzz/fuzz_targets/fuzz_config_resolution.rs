#![no_main]

//! Resolving configuration from arbitrary attribute values never panics and
//! always yields usable class names.

use libfuzzer_sys::fuzz_target;
use modaly::ModalConfig;
use modaly::markup::{
    ATTR_CLOSE_CLASS, ATTR_CLOSE_ON_ESCAPE, ATTR_CLOSE_ON_OUTSIDE, ATTR_OPEN_CLASS, ATTR_PERSIST,
};

#[derive(Debug, arbitrary::Arbitrary)]
struct Attrs {
    persist: Option<String>,
    escape: Option<String>,
    outside: Option<String>,
    open_class: Option<String>,
    close_class: Option<String>,
}

fuzz_target!(|attrs: Attrs| {
    let config = ModalConfig::resolve(|name| match name {
        ATTR_PERSIST => attrs.persist.as_deref(),
        ATTR_CLOSE_ON_ESCAPE => attrs.escape.as_deref(),
        ATTR_CLOSE_ON_OUTSIDE => attrs.outside.as_deref(),
        ATTR_OPEN_CLASS => attrs.open_class.as_deref(),
        ATTR_CLOSE_CLASS => attrs.close_class.as_deref(),
        _ => None,
    });

    assert_eq!(config.persist, attrs.persist.as_deref() == Some("true"));
    assert_eq!(config.close_on_escape, attrs.escape.as_deref() != Some("false"));
    assert!(!config.open_class.is_empty());
    assert!(!config.close_class.is_empty());
});
