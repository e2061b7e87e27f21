//! Seasonal anomaly flagging.

/// Flags a reading against its season's mean and standard deviation.
///
/// The rule is `|temperature| > |temp_mean| + 2 * temp_std`. Note that the
/// absolute value is taken of the raw temperature and of the mean, not of the
/// deviation `temperature - temp_mean`. For seasons with negative means this
/// means an unusually cold reading is only flagged when its magnitude exceeds
/// the bound, and an unusually warm one close to zero never is. The rule is
/// kept as is until the intended definition is confirmed; the deviation-based
/// variant is [`is_deviation_anomaly`].
///
/// A season with an undefined standard deviation never flags anything.
///
/// # Examples
///
/// ```
/// use climate_profile::is_anomaly;
///
/// assert!(is_anomaly(30.0, 20.0, Some(4.0)));
/// assert!(!is_anomaly(27.0, 20.0, Some(4.0)));
/// // -12 is far below a -5 mean but |-12| = 12 < 5 + 2 * 4
/// assert!(!is_anomaly(-12.0, -5.0, Some(4.0)));
/// assert!(!is_anomaly(100.0, 20.0, None));
/// ```
pub fn is_anomaly(temperature: f64, temp_mean: f64, temp_std: Option<f64>) -> bool {
    match temp_std {
        Some(std) => temperature.abs() > temp_mean.abs() + std * 2.0,
        None => false,
    }
}

/// Flags a reading whose deviation from the mean exceeds two standard deviations.
///
/// A season with an undefined standard deviation never flags anything.
///
/// ```
/// use climate_profile::is_deviation_anomaly;
///
/// assert!(is_deviation_anomaly(-14.0, -5.0, Some(4.0)));
/// assert!(!is_deviation_anomaly(-12.0, -5.0, Some(4.0)));
/// ```
pub fn is_deviation_anomaly(temperature: f64, temp_mean: f64, temp_std: Option<f64>) -> bool {
    match temp_std {
        Some(std) => (temperature - temp_mean).abs() > std * 2.0,
        None => false,
    }
}
