use once_cell::sync::Lazy;

static ENABLED: Lazy<bool> = Lazy::new(|| std::env::var_os("GROEBNER_LOG").is_some());

/// Whether progress lines are printed, controlled by `GROEBNER_LOG`.
#[inline]
pub fn enabled() -> bool {
    *ENABLED
}

/// Prints a timestamped progress line when logging is enabled.
macro_rules! progress {
    ($($arg:tt)*) => {
        if $crate::log::enabled() {
            println!(
                "{} {}",
                ::chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                format_args!($($arg)*)
            );
        }
    };
}
