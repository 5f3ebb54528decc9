//! Logging for tests.

/// Route the log facade to the test output.  Safe to call from every test.
pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}
