/// Checks that a numerical value is in the provided interval `[a,b]`, returning
/// early with a [`ConfigError::OutOfInterval`](crate::error::ConfigError) if not
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// ensure_interval!(alpha, 0.0, 1.0);
/// ```
/// This returns an error whose message reads "Invalid value 2 for \`alpha\`. Must be in the interval \[0, 1\]."
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        // NaN fails both comparisons
        if !($var >= $a && $var <= $b) {
            return Err($crate::error::ConfigError::OutOfInterval {
                name: stringify!($var),
                value: $var as f64,
                lo: $a,
                hi: $b,
            });
        }
    };
}

pub(crate) use ensure_interval;
