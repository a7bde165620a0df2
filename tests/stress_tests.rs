//! Stress tests for concurrent configuration
//!
//! These tests verify:
//! - Concurrent first calls create and attach exactly one default handler
//! - Concurrent child resolution converges on one node per name
//! - Logging from many threads while the default handler is toggled

use rust_library_logger::sinks::MemorySink;
use rust_library_logger::{LogLevel, Registry, Sink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

#[test]
fn test_concurrent_first_configuration_creates_one_handler() {
    for _ in 0..20 {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let registry = Arc::new(
            Registry::builder("mylib")
                .default_sink(move || -> Box<dyn Sink> {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Box::new(MemorySink::new())
                })
                .build()
                .expect("Failed to build registry"),
        );
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    match i % 3 {
                        0 => registry.ensure_configured(),
                        1 => registry.enable_default_handler(),
                        _ => {
                            registry.get_root_logger();
                        }
                    }
                    registry.default_handler()
                })
            })
            .collect();

        let handlers: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();

        assert_eq!(created.load(Ordering::SeqCst), 1, "Default sink created more than once");
        assert!(handlers.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(registry.get_root_logger().handler_count(), 1);
    }
}

#[test]
fn test_concurrent_child_resolution() {
    let registry = Arc::new(Registry::new("mylib").expect("Failed to build registry"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry
                    .get_child_logger("mylib::net::http", true)
                    .expect("valid name")
            })
        })
        .collect();

    let loggers: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert!(loggers.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(loggers[0].name(), "mylib.net.http");
}

#[test]
fn test_logging_while_toggling_default_handler() {
    let sink = MemorySink::new();
    let capture = sink.clone();
    let registry = Arc::new(
        Registry::builder("mylib")
            .default_sink(move || Box::new(capture.clone()))
            .build()
            .expect("Failed to build registry"),
    );
    let child = registry
        .get_child_logger("mylib.worker", true)
        .expect("valid name");

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let child = child.clone();
            thread::spawn(move || {
                for i in 0..250 {
                    child.log(LogLevel::Warning, format!("thread {} message {}", t, i));
                }
            })
        })
        .collect();

    let toggler = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..100 {
                registry.disable_default_handler();
                registry.enable_default_handler();
            }
        })
    };

    for handle in writers {
        handle.join().expect("writer panicked");
    }
    toggler.join().expect("toggler panicked");

    let root = registry.get_root_logger();
    assert_eq!(root.handlers(), vec![registry.default_handler()]);
    assert!(sink.lines().len() <= 1000);
}
