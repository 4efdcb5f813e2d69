//src/macros.rs

/// Runs a block, logging how long it took when the `timing` feature is on.
#[macro_export]
macro_rules! time_it {
    ($name:expr, $block:block) => {{
        #[cfg(feature = "timing")]
        {
            let start = std::time::Instant::now();
            let result = { $block };
            log::info!("{} took {:?}", $name, start.elapsed());
            result
        }
        #[cfg(not(feature = "timing"))]
        {
            { $block }
        }
    }};
}
