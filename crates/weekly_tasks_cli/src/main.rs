//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `weekly_tasks_core` linkage without any UI shell.
//! - Keep output deterministic for quick local sanity checks.

use weekly_tasks_core::{core_version, ping, DEFAULT_RECORD_KEY};

fn main() {
    println!("weekly_tasks_core ping={}", ping());
    println!("weekly_tasks_core version={}", core_version());
    println!("weekly_tasks_core record_key={DEFAULT_RECORD_KEY}");
}
