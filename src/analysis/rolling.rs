//! Trailing-window smoothing over a single city's ordered temperatures.

/// Mean and sample standard deviation of the window ending at one position.
///
/// Both are `None` while the window is not yet full. The standard deviation
/// is also `None` for a window of one value, and either is `None` when the
/// window contains a NaN temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingStats {
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

impl RollingStats {
    const UNDEFINED: RollingStats = RollingStats {
        mean: None,
        std: None,
    };

    pub fn is_complete(&self) -> bool {
        self.mean.is_some() && self.std.is_some()
    }
}

/// Computes trailing rolling statistics aligned to the input positions.
///
/// Position `i` is defined once `i + 1 >= window`, covering
/// `temperatures[i + 1 - window..=i]`. The caller is responsible for passing
/// temperatures in chronological order.
///
/// # Examples
///
/// ```
/// use climate_profile::rolling_stats;
///
/// let stats = rolling_stats(&[1.0, 2.0, 3.0, 4.0], 3);
/// assert_eq!(stats[1].mean, None);
/// assert_eq!(stats[2].mean, Some(2.0));
/// assert_eq!(stats[3].mean, Some(3.0));
/// assert_eq!(stats[3].std, Some(1.0));
/// ```
pub fn rolling_stats(temperatures: &[f64], window: usize) -> Vec<RollingStats> {
    if window == 0 {
        return vec![RollingStats::UNDEFINED; temperatures.len()];
    }

    temperatures
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return RollingStats::UNDEFINED;
            }
            window_stats(&temperatures[i + 1 - window..=i])
        })
        .collect()
}

fn window_stats(segment: &[f64]) -> RollingStats {
    // A window of equal values is exactly its value with zero spread
    if let [first, rest @ ..] = segment {
        if !rest.is_empty() && rest.iter().all(|x| x == first) {
            return RollingStats {
                mean: Some(*first),
                std: Some(0.0),
            };
        }
    }
    let n = segment.len() as f64;
    let mean = segment.iter().sum::<f64>() / n;
    if mean.is_nan() {
        return RollingStats::UNDEFINED;
    }
    let std = if segment.len() >= 2 {
        let var = segment.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(var.sqrt())
    } else {
        None
    };
    RollingStats {
        mean: Some(mean),
        std,
    }
}
