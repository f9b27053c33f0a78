use crate::domain::{format_percent, ClassificationResult, SustainabilityMetrics};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Species cycled through when no classifier answers.
pub const MOCK_SPECIES: [&str; 3] = ["Sea Bass", "Gilt-Head Bream", "Red Mullet"];

const CONFIDENCE_RANGE: std::ops::RangeInclusive<f64> = 75.0..=87.0;

/// Species at `index` and the index that follows it.
pub const fn rotate(index: usize) -> (&'static str, usize) {
    let current = index % MOCK_SPECIES.len();
    (MOCK_SPECIES[current], (current + 1) % MOCK_SPECIES.len())
}

/// Round-robin classifier stand-in. One instance is shared by every
/// classification the Fisheries view issues, so repeated fallbacks cycle.
#[derive(Debug, Default)]
pub struct FishClassifierMock {
    cursor: AtomicUsize,
}

impl FishClassifierMock {
    pub const fn new() -> Self {
        Self {
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> ClassificationResult {
        let index = match self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |index| {
                Some(rotate(index).1)
            }) {
            Ok(index) | Err(index) => index,
        };
        let (species, _) = rotate(index);

        ClassificationResult {
            species: species.to_string(),
            confidence: format_percent(rng.gen_range(CONFIDENCE_RANGE)),
        }
    }
}

/// `(year, stock, total catch)` sample the stock service falls back to.
pub const SAMPLE_STOCK: [(i32, f64, f64); 10] = [
    (2010, 15_000.0, 12_000.0),
    (2011, 14_500.0, 11_800.0),
    (2012, 14_000.0, 11_600.0),
    (2013, 13_700.0, 11_400.0),
    (2014, 13_400.0, 11_200.0),
    (2015, 13_100.0, 11_000.0),
    (2016, 12_800.0, 10_800.0),
    (2017, 12_500.0, 10_600.0),
    (2018, 12_200.0, 10_400.0),
    (2019, 11_900.0, 10_200.0),
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Exploitation and trend figures for a yearly stock series.
pub fn sustainability_metrics(samples: &[(i32, f64, f64)]) -> Option<SustainabilityMetrics> {
    let &(_, current_stock, current_catch) = samples.last()?;
    let previous_stock = samples
        .len()
        .checked_sub(2)
        .and_then(|index| samples.get(index))
        .map_or(current_stock, |&(_, stock, _)| stock);

    let stock_change_percent = (current_stock - previous_stock) / previous_stock * 100.0;
    let exploitation_rate = current_catch / current_stock * 100.0;

    let (status, recommendation) = if exploitation_rate > 80.0 {
        ("Overfishing", "Reduce fishing effort by at least 30%")
    } else if exploitation_rate > 60.0 {
        ("Fully Exploited", "Maintain current fishing levels")
    } else {
        (
            "Sustainable",
            "Stock is healthy, can maintain current fishing levels",
        )
    };

    let trend = match samples.len().checked_sub(3).map(|index| &samples[index..]) {
        Some([(_, first, _), _, (_, last, _)]) if last > first => "Increasing",
        Some([_, _, _]) => "Decreasing",
        _ => "Stable",
    };

    #[allow(clippy::cast_possible_truncation)]
    let current_stock = current_stock as i64;

    Some(SustainabilityMetrics {
        current_stock,
        stock_change_percent: round2(stock_change_percent),
        exploitation_rate: round2(exploitation_rate),
        sustainability_status: status.to_string(),
        recommendation: recommendation.to_string(),
        trend: trend.to_string(),
    })
}

pub fn stock_metrics() -> SustainabilityMetrics {
    // The sample series is non-empty, so this never takes the default branch.
    sustainability_metrics(&SAMPLE_STOCK).unwrap_or_else(|| SustainabilityMetrics {
        current_stock: 0,
        stock_change_percent: 0.0,
        exploitation_rate: 0.0,
        sustainability_status: "Unknown".to_string(),
        recommendation: String::new(),
        trend: "Stable".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn classifications_rotate_through_species() {
        let mock = FishClassifierMock::new();
        let mut rng = StdRng::seed_from_u64(9);

        let species: Vec<String> = (0..4).map(|_| mock.next(&mut rng).species).collect();
        assert_eq!(species, ["Sea Bass", "Gilt-Head Bream", "Red Mullet", "Sea Bass"]);
    }

    #[test]
    fn rotate_threads_the_index() {
        let (first, next) = rotate(0);
        let (second, next) = rotate(next);
        let (third, next) = rotate(next);
        assert_eq!([first, second, third], MOCK_SPECIES);
        assert_eq!(next, 0);
        assert_eq!(rotate(5).0, "Red Mullet");
    }

    #[test]
    fn confidence_is_a_two_decimal_percentage_in_range() {
        let mock = FishClassifierMock::new();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let confidence = mock.next(&mut rng).confidence;
            let number = confidence.strip_suffix('%').unwrap();
            assert_eq!(number.split('.').nth(1).map(str::len), Some(2));
            let value: f64 = number.parse().unwrap();
            assert!((75.0..=87.0).contains(&value));
        }
    }

    #[test]
    fn sample_stock_is_overfished_and_declining() {
        let metrics = stock_metrics();
        assert_eq!(metrics.current_stock, 11_900);
        assert!((metrics.stock_change_percent - -2.46).abs() < 1e-9);
        assert!((metrics.exploitation_rate - 85.71).abs() < 1e-9);
        assert_eq!(metrics.sustainability_status, "Overfishing");
        assert_eq!(metrics.trend, "Decreasing");
    }

    #[test]
    fn short_series_report_stable_trend() {
        let metrics = sustainability_metrics(&[(2020, 100.0, 50.0)]).unwrap();
        assert_eq!(metrics.trend, "Stable");
        assert_eq!(metrics.sustainability_status, "Sustainable");
        assert!(metrics.stock_change_percent.abs() < 1e-9);
        assert!(sustainability_metrics(&[]).is_none());
    }
}
