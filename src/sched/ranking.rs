//! Placement preference order over the hours of the day.

use crate::tariff::{HOURS_PER_DAY, TariffCurve};

/// Distance of `hour` from the window `[earliest, latest)`.
///
/// Zero inside the window, `earliest - hour` before it and
/// `hour - latest + 1` at or after its end.
pub fn distance_from_window(hour: usize, earliest: usize, latest: usize) -> usize {
    if hour < earliest {
        earliest - hour
    } else if hour >= latest {
        hour - latest + 1
    } else {
        0
    }
}

/// Ranks all 24 hours by placement preference for a window.
///
/// In-window hours come first in ascending order. The remaining hours follow
/// ordered by distance from the window, then by tariff price, then by hour.
/// When `earliest >= latest` the window is empty and every hour is ranked by
/// the outside rule.
///
/// # Examples
///
/// ```
/// use load_scheduler::sched::ranking::rank_hours;
/// use load_scheduler::tariff::TariffCurve;
///
/// let tariff = TariffCurve::flat(0.1).expect("valid tariff");
/// let ranked = rank_hours(8, 12, &tariff);
/// assert_eq!(&ranked[..6], &[8, 9, 10, 11, 7, 12]);
/// ```
pub fn rank_hours(earliest: usize, latest: usize, tariff: &TariffCurve) -> [usize; HOURS_PER_DAY] {
    let inside = earliest.min(HOURS_PER_DAY)..latest.min(HOURS_PER_DAY);

    let mut outside: Vec<usize> = (0..HOURS_PER_DAY).filter(|h| !inside.contains(h)).collect();
    // Stable sort: equal (distance, price) keeps ascending hour order.
    outside.sort_by(|&a, &b| {
        distance_from_window(a, earliest, latest)
            .cmp(&distance_from_window(b, earliest, latest))
            .then(tariff[a].total_cmp(&tariff[b]))
    });

    let mut ranked = [0; HOURS_PER_DAY];
    for (slot, hour) in ranked.iter_mut().zip(inside.chain(outside)) {
        *slot = hour;
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> TariffCurve {
        TariffCurve::flat(0.1).unwrap()
    }

    fn is_permutation(ranked: &[usize; HOURS_PER_DAY]) -> bool {
        let mut sorted = *ranked;
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &h)| i == h)
    }

    #[test]
    fn distance_rules() {
        assert_eq!(distance_from_window(5, 8, 12), 3);
        assert_eq!(distance_from_window(8, 8, 12), 0);
        assert_eq!(distance_from_window(11, 8, 12), 0);
        assert_eq!(distance_from_window(12, 8, 12), 1);
        assert_eq!(distance_from_window(23, 8, 12), 12);
    }

    #[test]
    fn window_hours_come_first_in_order() {
        let ranked = rank_hours(8, 12, &flat());
        assert_eq!(&ranked[..4], &[8, 9, 10, 11]);
        assert!(is_permutation(&ranked));
    }

    #[test]
    fn equal_distance_prefers_cheaper_hour() {
        // Hour 7 and hour 12 are both at distance 1 from [8, 12).
        let mut prices = vec![0.2; 24];
        prices[12] = 0.05;
        let tariff = TariffCurve::new(prices).unwrap();
        let ranked = rank_hours(8, 12, &tariff);
        assert_eq!(&ranked[4..6], &[12, 7]);
    }

    #[test]
    fn nearer_hour_beats_cheaper_far_hour() {
        let mut prices = vec![0.2; 24];
        prices[23] = 0.01;
        let tariff = TariffCurve::new(prices).unwrap();
        let ranked = rank_hours(8, 12, &tariff);
        let pos = |h: usize| ranked.iter().position(|&x| x == h).unwrap();
        assert!(pos(11) < pos(13));
        assert!(pos(13) < pos(23));
    }

    #[test]
    fn ties_fall_back_to_ascending_hour() {
        let ranked = rank_hours(10, 11, &flat());
        assert_eq!(&ranked[..5], &[10, 9, 11, 8, 12]);
    }

    #[test]
    fn empty_window_ranks_everything_by_distance() {
        let ranked = rank_hours(12, 12, &flat());
        assert!(is_permutation(&ranked));
        // Hour 12 sits at distance 1 via the `h >= latest` arm, as does 11.
        assert_eq!(&ranked[..2], &[11, 12]);
    }

    #[test]
    fn inverted_window_has_no_inside_hours() {
        let ranked = rank_hours(22, 6, &flat());
        assert!(is_permutation(&ranked));
        // Hours before 22 measure from `earliest`, so 21 leads.
        assert_eq!(ranked[0], 21);
    }

    #[test]
    fn full_day_window_is_identity() {
        let ranked = rank_hours(0, 24, &flat());
        let identity: Vec<usize> = (0..24).collect();
        assert_eq!(ranked.to_vec(), identity);
    }
}
