//! Structured diagnostics for the dataset and metric paths.
//!
//! `log_metric!` emits one `VOLSEG_METRIC: { .. }` key/value line per event at
//! `debug` level through the `log` facade, so the host's logger decides whether
//! it is shown. The body is wrapped in `#[cfg(debug_assertions)]`, so calls are
//! compiled out of release builds.

/// Logs a structured key-value metric line at `debug` level, only in debug builds.
///
/// # Example
/// ```
/// use volseg::log_metric;
/// let slices = 48;
/// log_metric!("event"="build_slice_table", "slices"=&slices);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            if $crate::__log::log_enabled!($crate::__log::Level::Debug) {
                let parts: Vec<String> = vec![
                    $(format!("\"{}\": \"{}\"", $key, $value)),+
                ];
                $crate::__log::debug!("VOLSEG_METRIC: {{ {} }}", parts.join(", "));
            }
        }
    };
}
