use tv_launcher::log_capture::init_tracing;

struct EarlyLogger;

impl log::Log for EarlyLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }
    fn log(&self, _: &log::Record) {}
    fn flush(&self) {}
}

static EARLY: EarlyLogger = EarlyLogger;

#[test]
fn test_logger_installed_first_is_reported() {
    log::set_logger(&EARLY).unwrap();

    let err = init_tracing("trace").unwrap_err();
    assert!(
        format!("{:#}", err).contains("Failed to install tracing subscriber"),
        "{:#}",
        err
    );
}
