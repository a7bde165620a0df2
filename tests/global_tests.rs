//! Tests for the process-wide surface
//!
//! All tests share one registry, so each takes the serial lock and resets
//! the registry before running.

use parking_lot::{const_mutex, Mutex, MutexGuard};
use rust_library_logger::sinks::MemorySink;
use rust_library_logger::{
    default_handler, disable_default_handler, enable_default_handler, get_child_logger,
    get_root_logger, registry, reset, suppress_all, suppress_default, with_all_suppressed,
    Handler, LogLevel, LoggerError, ENTRY_POINT_NAME, LIBRARY_NAMESPACE,
};

static SERIAL: Mutex<()> = const_mutex(());

fn fresh() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock();
    reset();
    guard
}

#[test]
fn test_root_logger_defaults() {
    let _serial = fresh();
    let root = get_root_logger();

    assert_eq!(root.name(), LIBRARY_NAMESPACE);
    assert_eq!(root.name(), "rust_library_logger");
    assert_eq!(root.handlers(), vec![default_handler()]);
    assert_eq!(root.level(), LogLevel::Info);
    assert!(!root.propagate());
    assert!(registry().is_configured());
}

#[test]
fn test_default_handler_identity_is_stable() {
    let _serial = fresh();
    let first = default_handler();
    get_root_logger();
    enable_default_handler();
    assert_eq!(default_handler(), first);
    assert_eq!(get_root_logger().handler_count(), 1);
}

#[test]
fn test_child_logger_from_module_path() {
    let _serial = fresh();
    let child = get_child_logger("rust_library_logger::codec::frame", true).expect("valid name");
    assert_eq!(child.name(), "rust_library_logger.codec.frame");
    assert_eq!(child.parent().and_then(|p| p.parent()), Some(get_root_logger()));

    let main = get_child_logger(ENTRY_POINT_NAME, false).expect("valid name");
    assert_eq!(main.name(), "rust_library_logger.__main__");
    assert!(!main.propagate());

    assert!(matches!(
        get_child_logger(module_path!(), true),
        Err(LoggerError::InvalidNamespace { .. })
    ));
}

#[test]
fn test_disable_then_enable() {
    let _serial = fresh();
    let root = get_root_logger();
    let custom = Handler::new(MemorySink::new());
    root.add_handler(custom.clone());

    disable_default_handler();
    assert_eq!(root.handlers(), vec![custom.clone()]);

    enable_default_handler();
    assert_eq!(root.handler_count(), 2);
    assert!(root.contains_handler(&default_handler()));
}

#[test]
fn test_suppress_default_guard() {
    let _serial = fresh();
    let root = get_root_logger();
    let default = default_handler();
    let emitted_before = default.metrics().emitted_count();

    {
        let guard = suppress_default();
        assert!(guard.placeholder_attached());
        assert!(!root.contains_handler(&default));
        root.warning("suppressed");
    }

    assert_eq!(default.metrics().emitted_count(), emitted_before);
    assert_eq!(root.handlers(), vec![default]);
}

#[test]
fn test_nested_suppress_all() {
    let _serial = fresh();
    let root = get_root_logger();
    let original = root.handlers();

    let outer = suppress_all();
    let suppressed = root.handlers();
    assert_eq!(suppressed.len(), 1);
    assert!(suppressed[0].is_placeholder());

    with_all_suppressed(|| {
        assert_eq!(root.handler_count(), 1);
        assert_ne!(root.handlers(), suppressed);
    });
    assert_eq!(root.handlers(), suppressed);

    drop(outer);
    assert_eq!(root.handlers(), original);
}
