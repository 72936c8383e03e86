// Installs the global subscriber, so it lives in its own test binary.

#[test]
fn second_init_fails_and_keeps_the_first_subscriber() {
    tarry_utils::logging::init().unwrap();
    assert!(tarry_utils::logging::init().is_err());
    tracing::info!("still logging through the first subscriber");
}
