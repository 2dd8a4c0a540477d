use std::path::PathBuf;
use std::sync::Arc;

use mud_core::{Mud, NoHighlighter, RenderOptions};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).expect("fixture exists")
}

/// A renderer with default options and no highlighting, so output does not
/// depend on the bundled syntax definitions.
#[allow(dead_code)]
pub fn plain_mud() -> Mud {
    init_tracing();
    Mud::new(RenderOptions::default()).with_highlighter(Arc::new(NoHighlighter))
}

/// The `lc` cell contents of a Down mode table, one per row.
#[allow(dead_code)]
pub fn down_cells(table: &str) -> Vec<String> {
    table
        .split("<td class=\"lc\">")
        .skip(1)
        .map(|cell| cell.split("</td></tr>").next().unwrap_or_default().to_owned())
        .collect()
}
