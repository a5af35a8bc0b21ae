/// Runs `$block` and, when `config::LOG_PERFORMANCE` is on, logs an error if it
/// took longer than `$threshold_micros`.
#[macro_export]
macro_rules! trace_time {
    ($name:expr, $threshold_micros:expr, $block:block) => {{
        if $crate::config::LOG_PERFORMANCE {
            let start = $crate::utils::AppInstant::now();
            let result = $block;
            let micros = start.elapsed().as_micros();
            if micros > $threshold_micros {
                let build = if cfg!(debug_assertions) { "debug" } else { "release" };
                log::error!(
                    "slow [{}]: '{}' took {:.3}ms (threshold {:.3}ms)",
                    build,
                    $name,
                    micros as f64 / 1000.0,
                    $threshold_micros as f64 / 1000.0
                );
            }
            result
        } else {
            $block
        }
    }};
}
