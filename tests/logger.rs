//! Integration tests for logger behavior.

use studyflow::logger::{current_level, set_level, set_level_from_str, Level};
use studyflow::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn levels_are_ordered_by_severity() {
    assert!(Level::Error < Level::Warn);
    assert!(Level::Info < Level::Debug);
    set_level(Level::Info);
    assert!(current_level() >= Level::Error);
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}
