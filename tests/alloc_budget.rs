mod common;

use common::alloc_counter::AllocCounter;
use common::fixtures::synthetic_document;
use page_styles::{resolve_styles, StyleOptions};
use page_stylesheet::Stylesheet;

#[global_allocator]
static ALLOC: AllocCounter = AllocCounter::new();

// Slack for allocations the test harness may make on its own thread.
const RETAINED_SLACK_BYTES: isize = 4 * 1024;

#[test]
fn resolve_pass_retains_nothing_and_scales_linearly_with_pages() {
    let sheet = Stylesheet::default();
    let options = StyleOptions::default();
    let small = synthetic_document(4, 3, 2);
    let large = synthetic_document(8, 3, 2);

    // Warm up lazily-initialized std state before measuring.
    drop(resolve_styles(&sheet, &small, &options).expect("warmup"));

    let before = ALLOC.snapshot();
    let styled = resolve_styles(&sheet, &small, &options).expect("small resolves");
    drop(styled);
    let small_pass = ALLOC.since(before);
    assert!(
        small_pass.live_bytes <= RETAINED_SLACK_BYTES,
        "resolve retained {} bytes after the output was dropped",
        small_pass.live_bytes
    );
    assert!(small_pass.allocations > 0);

    let before = ALLOC.snapshot();
    let styled = resolve_styles(&sheet, &large, &options).expect("large resolves");
    drop(styled);
    let large_pass = ALLOC.since(before);
    assert!(
        large_pass.live_bytes <= RETAINED_SLACK_BYTES,
        "resolve retained {} bytes after the output was dropped",
        large_pass.live_bytes
    );

    let ceiling = small_pass.allocations * 2 + 64;
    assert!(
        large_pass.allocations <= ceiling,
        "allocations grew faster than page count: {} for 8 pages vs {} for 4 (ceiling {})",
        large_pass.allocations,
        small_pass.allocations,
        ceiling
    );
    println!(
        "resolve allocs small={} large={}",
        small_pass.allocations, large_pass.allocations
    );
}
