use std::path::PathBuf;

/// Returns the path to the pipeline file used by the CLI tests.
pub fn pipeline_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/pipeline.yaml")
}
