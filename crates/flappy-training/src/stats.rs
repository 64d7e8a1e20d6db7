use serde::Serialize;

/// Summary of the lifetimes a generation reached, in ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifetimeStats {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    /// Upper median for even counts.
    pub median: u64,
    pub std_dev: f64,
}

impl LifetimeStats {
    /// Returns `None` for an empty population.
    ///
    /// ```
    /// # use flappy_training::stats::LifetimeStats;
    /// let stats = LifetimeStats::new([30, 10, 20]).unwrap();
    /// assert_eq!((stats.min, stats.max, stats.median), (10, 30, 20));
    /// assert_eq!(stats.mean, 20.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(lifetimes: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut values = lifetimes.into_iter().collect::<Vec<_>>();
        values.sort_unstable();

        let min = *values.first()?;
        let max = *values.last()?;
        let n = values.len() as f64;
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        Some(Self {
            min,
            max,
            mean,
            median: values[values.len() / 2],
            std_dev: variance.sqrt(),
        })
    }
}
