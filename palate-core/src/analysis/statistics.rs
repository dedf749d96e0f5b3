//! Rating, category, dietary and timeline statistics over a feedback history
//!
//! Everything here is pure and synchronous. Averages are kept at full
//! precision; [`round1`] is only for display.

use crate::analysis::AnalysisError;
use crate::analysis::types::{
    CategoryBreakdown, DietaryBreakdown, FeedbackRecord, FeedbackStatistics, GroupStatistic,
    RatingStatistics, RatingTrend, TimelinePoint, TimelineTrend,
};
use crate::config::constants::thresholds;
use indexmap::{IndexMap, IndexSet};

/// Aggregate a customer's non-empty feedback history.
///
/// Returns [`AnalysisError::InsufficientData`] for an empty slice; callers
/// substitute the "no history" default instead.
pub fn aggregate(records: &[FeedbackRecord]) -> Result<FeedbackStatistics, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "no feedback records to aggregate".to_string(),
        ));
    }

    let timeline = timeline_trend(records);
    Ok(FeedbackStatistics {
        ratings: rating_statistics(records),
        categories: category_breakdown(records),
        dietary: dietary_breakdown(records),
        total_feedback: records.len(),
        last_feedback_date: timeline.last_feedback_date,
        timeline,
    })
}

pub fn rating_statistics(records: &[FeedbackRecord]) -> RatingStatistics {
    let ratings: Vec<f64> = records.iter().map(|r| f64::from(r.rating)).collect();

    let mut stats = RatingStatistics::empty();
    stats.average_rating = mean(&ratings);

    let mut preferred = IndexSet::new();
    let mut disliked = IndexSet::new();
    for record in records {
        *stats.rating_distribution.entry(record.rating).or_insert(0) += 1;

        if record.rating >= thresholds::POSITIVE_RATING {
            stats.positive_count += 1;
            preferred.insert(record.food_item_name.clone());
        }
        if record.rating <= thresholds::NEGATIVE_RATING {
            stats.negative_count += 1;
            disliked.insert(record.food_item_name.clone());
        }
    }

    stats.preferred_items = preferred.into_iter().collect();
    stats.disliked_items = disliked.into_iter().collect();
    stats
}

pub fn category_breakdown(records: &[FeedbackRecord]) -> CategoryBreakdown {
    let mut groups = GroupAccumulator::default();
    for record in records {
        if let Some(category) = record.category.as_deref() {
            groups.add(category, record);
        }
    }

    let categories = groups.finish();
    CategoryBreakdown {
        best_category: best(&categories).cloned(),
        worst_category: worst(&categories).cloned(),
        categories,
    }
}

/// A record with N dietary tags contributes to N buckets.
pub fn dietary_breakdown(records: &[FeedbackRecord]) -> DietaryBreakdown {
    let mut groups = GroupAccumulator::default();
    for record in records {
        for tag in &record.dietary_tags {
            groups.add(tag, record);
        }
    }

    let tags = groups.finish();
    let preferred_tags = tags
        .iter()
        .filter(|t| t.average_rating >= thresholds::PREFERRED_TAG_AVERAGE)
        .map(|t| t.key.clone())
        .collect();
    let avoided_tags = tags
        .iter()
        .filter(|t| t.average_rating <= thresholds::AVOIDED_TAG_AVERAGE)
        .map(|t| t.key.clone())
        .collect();

    DietaryBreakdown {
        tags,
        preferred_tags,
        avoided_tags,
    }
}

pub fn timeline_trend(records: &[FeedbackRecord]) -> TimelineTrend {
    let mut sorted: Vec<&FeedbackRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.created_at);

    let points: Vec<TimelinePoint> = sorted
        .iter()
        .map(|r| TimelinePoint {
            date: r.created_at,
            rating: r.rating,
            food_item: r.food_item_name.clone(),
        })
        .collect();

    let ratings: Vec<f64> = points.iter().map(|p| f64::from(p.rating)).collect();
    let slope = least_squares_slope(&ratings);

    TimelineTrend {
        first_feedback_date: points.first().map(|p| p.date),
        last_feedback_date: points.last().map(|p| p.date),
        trend: RatingTrend::from_slope(slope),
        slope,
        points,
    }
}

/// Highest average; the first-encountered key wins ties.
pub fn best(stats: &[GroupStatistic]) -> Option<&GroupStatistic> {
    stats.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.average_rating <= current.average_rating => Some(current),
        _ => Some(candidate),
    })
}

/// Lowest average; the first-encountered key wins ties.
pub fn worst(stats: &[GroupStatistic]) -> Option<&GroupStatistic> {
    stats.iter().fold(None, |worst, candidate| match worst {
        Some(current) if candidate.average_rating >= current.average_rating => Some(current),
        _ => Some(candidate),
    })
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Square root of the mean squared deviation
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let squared = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    squared.sqrt()
}

/// Slope of the least-squares line through `(index, value)`; 0 when fewer
/// than two points make the fit undefined.
pub fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = values.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), (i, y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sxx + x * x)
        },
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Default)]
struct GroupBucket {
    feedback_count: usize,
    total_rating: u64,
    items: IndexSet<String>,
}

#[derive(Default)]
struct GroupAccumulator {
    buckets: IndexMap<String, GroupBucket>,
}

impl GroupAccumulator {
    fn add(&mut self, key: &str, record: &FeedbackRecord) {
        let bucket = self.buckets.entry(key.to_string()).or_default();
        bucket.feedback_count += 1;
        bucket.total_rating += u64::from(record.rating);
        bucket.items.insert(record.food_item_name.clone());
    }

    fn finish(self) -> Vec<GroupStatistic> {
        self.buckets
            .into_iter()
            .map(|(key, bucket)| GroupStatistic {
                key,
                average_rating: bucket.total_rating as f64 / bucket.feedback_count as f64,
                item_count: bucket.items.len(),
                feedback_count: bucket.feedback_count,
            })
            .collect()
    }
}
