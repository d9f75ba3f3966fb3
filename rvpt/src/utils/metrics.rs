/// Runs `f`, reporting how long it took through `log::trace!()` when the
/// `metrics` feature is enabled.
#[cfg(feature = "metrics")]
pub fn metric<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let tt = std::time::Instant::now();
    let val = f();

    log::trace!("{}: {}", label, humantime::format_duration(tt.elapsed()));

    val
}

#[cfg(not(feature = "metrics"))]
pub fn metric<T>(_label: &str, f: impl FnOnce() -> T) -> T {
    f()
}
