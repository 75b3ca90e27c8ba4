use std::cmp::Ordering;

use ingest::RatingRecord;

/// Orders rows by rating, highest first. The sort is stable, so rows with
/// equal ratings keep table order.
pub(crate) fn by_rating_desc<'a, I>(rows: I) -> Vec<&'a RatingRecord>
where
    I: IntoIterator<Item = &'a RatingRecord>,
{
    let mut rows: Vec<&RatingRecord> = rows.into_iter().collect();
    rows.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    rows
}

/// Sort by rating, keep `rating >= threshold`, take `count`.
pub(crate) fn top_rated<'a, I>(rows: I, threshold: f32, count: usize) -> Vec<&'a RatingRecord>
where
    I: IntoIterator<Item = &'a RatingRecord>,
{
    by_rating_desc(rows)
        .into_iter()
        .filter(|row| row.rating >= threshold)
        .take(count)
        .collect()
}
