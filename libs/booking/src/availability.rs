use chrono::{NaiveTime, Timelike};

use crate::SlotGrid;

/// A half-open reserved interval `[start, start + duration_hours)` on a
/// single court and day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
	pub start:          NaiveTime,
	pub duration_hours: i32,
}

impl Interval {
	#[must_use]
	pub fn new(start: NaiveTime, duration_hours: i32) -> Self {
		Self { start, duration_hours }
	}

	fn start_minute(self) -> i64 {
		i64::from(self.start.hour() * 60 + self.start.minute())
	}

	fn end_minute(self) -> i64 {
		self.start_minute() + i64::from(self.duration_hours) * 60
	}

	/// Half-open interval overlap: `[a, a+d1)` and `[b, b+d2)` overlap iff
	/// `a < b+d2 && b < a+d1`
	#[must_use]
	pub fn overlaps(self, other: Self) -> bool {
		self.start_minute() < other.end_minute()
			&& other.start_minute() < self.end_minute()
	}
}

/// Compute which candidate start times can hold a booking of
/// `duration_hours` given the existing pending/confirmed reservations for
/// the same court and day
///
/// A candidate survives iff its interval overlaps no existing interval and
/// does not extend past closing time. Pure function; callers are expected
/// to pass freshly read reservations on the write path.
#[must_use]
pub fn available_slots(
	grid: &SlotGrid,
	candidates: &[NaiveTime],
	duration_hours: i32,
	existing: &[Interval],
) -> Vec<NaiveTime> {
	candidates
		.iter()
		.copied()
		.filter(|start| {
			grid.contains(*start, duration_hours)
				&& is_interval_free(
					Interval::new(*start, duration_hours),
					existing,
				)
		})
		.collect()
}

/// Whether a requested interval is free of conflicts
#[must_use]
pub fn is_interval_free(requested: Interval, existing: &[Interval]) -> bool {
	existing.iter().all(|taken| !requested.overlaps(*taken))
}

/// Expand reservations into the flat list of occupied whole-hour markers
/// used by single-hour granularity displays
#[must_use]
pub fn occupied_hours(existing: &[Interval]) -> Vec<NaiveTime> {
	let mut hours = vec![];

	for interval in existing {
		for offset in 0..interval.duration_hours.max(0) {
			let minute = interval.start_minute() + i64::from(offset) * 60;

			#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
			let (h, m) = ((minute / 60) as u32, (minute % 60) as u32);

			if let Some(time) = NaiveTime::from_hms_opt(h, m, 0) {
				hours.push(time);
			}
		}
	}

	hours.sort();
	hours.dedup();
	hours
}

/// Incremental fast-path check against precomputed occupied-hour markers
///
/// Agrees with [`is_interval_free`] for every hour-aligned input: a marker
/// at `h` occupies `[h, h+1h)`, so a request starting at `start` for
/// `duration_hours` is available iff no marker falls within
/// `[start, start + duration_hours)`.
#[must_use]
pub fn is_slot_available(
	start: NaiveTime,
	duration_hours: i32,
	booked_hours: &[NaiveTime],
) -> bool {
	let requested = Interval::new(start, duration_hours);

	booked_hours
		.iter()
		.all(|taken| !requested.overlaps(Interval::new(*taken, 1)))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn time(h: u32, m: u32) -> NaiveTime {
		NaiveTime::from_hms_opt(h, m, 0).unwrap()
	}

	fn grid() -> SlotGrid { SlotGrid::new(6, 22, 60).unwrap() }

	#[test]
	fn overlap_is_symmetric() {
		let a = Interval::new(time(14, 0), 2);
		let b = Interval::new(time(15, 0), 1);

		assert!(a.overlaps(b));
		assert!(b.overlaps(a));
	}

	#[test]
	fn adjacent_intervals_do_not_overlap() {
		let a = Interval::new(time(14, 0), 2);
		let b = Interval::new(time(16, 0), 1);
		let c = Interval::new(time(13, 0), 1);

		assert!(!a.overlaps(b));
		assert!(!b.overlaps(a));
		assert!(!a.overlaps(c));
	}

	#[test]
	fn multi_hour_reservation_blocks_every_covered_start() {
		let existing = vec![Interval::new(time(14, 0), 2)];
		let grid = grid();

		let free = available_slots(&grid, &grid.slots(), 1, &existing);

		assert!(!free.contains(&time(14, 0)));
		assert!(!free.contains(&time(15, 0)));
		assert!(free.contains(&time(13, 0)));
		assert!(free.contains(&time(16, 0)));
	}

	#[test]
	fn requested_duration_spans_backwards_over_conflicts() {
		// a 2h request at 13:00 collides with a booking at 14:00
		let existing = vec![Interval::new(time(14, 0), 1)];
		let grid = grid();

		let free = available_slots(&grid, &grid.slots(), 2, &existing);

		assert!(!free.contains(&time(13, 0)));
		assert!(!free.contains(&time(14, 0)));
		assert!(free.contains(&time(12, 0)));
		assert!(free.contains(&time(15, 0)));
	}

	#[test]
	fn slots_crossing_closing_time_are_rejected() {
		let grid = grid();

		let free = available_slots(&grid, &grid.slots(), 2, &[]);

		assert!(free.contains(&time(20, 0)));
		assert!(!free.contains(&time(21, 0)));
	}

	#[test]
	fn availability_is_idempotent() {
		let existing =
			vec![Interval::new(time(9, 0), 1), Interval::new(time(14, 0), 2)];
		let grid = grid();

		let first = available_slots(&grid, &grid.slots(), 1, &existing);
		let second = available_slots(&grid, &grid.slots(), 1, &existing);

		assert_eq!(first, second);
	}

	#[test]
	fn committed_reservations_never_overlap_pairwise() {
		// greedily commit requests through the availability check and
		// verify the no-overlap invariant over the accepted set
		let grid = grid();
		let requests = [
			(time(14, 0), 2),
			(time(15, 0), 1), // conflicts with the 14:00 booking
			(time(16, 0), 1),
			(time(13, 0), 2), // conflicts with the 14:00 booking
			(time(9, 0), 4),
			(time(11, 0), 1), // conflicts with the 09:00 booking
		];

		let mut committed: Vec<Interval> = vec![];

		for (start, duration) in requests {
			let requested = Interval::new(start, duration);

			if grid.contains(start, duration)
				&& is_interval_free(requested, &committed)
			{
				committed.push(requested);
			}
		}

		assert_eq!(committed.len(), 3);

		for (i, a) in committed.iter().enumerate() {
			for b in &committed[i + 1..] {
				assert!(!a.overlaps(*b), "{a:?} overlaps {b:?}");
			}
		}
	}

	#[test]
	fn occupied_hours_expand_multi_hour_bookings() {
		let existing =
			vec![Interval::new(time(14, 0), 2), Interval::new(time(9, 0), 1)];

		assert_eq!(
			occupied_hours(&existing),
			vec![time(9, 0), time(14, 0), time(15, 0)],
		);
	}

	#[test]
	fn fast_path_agrees_with_interval_algorithm() {
		let existing =
			vec![Interval::new(time(14, 0), 2), Interval::new(time(9, 0), 1)];
		let markers = occupied_hours(&existing);
		let grid = grid();

		for duration in 1..=4 {
			for candidate in grid.slots() {
				let by_interval = is_interval_free(
					Interval::new(candidate, duration),
					&existing,
				);
				let by_markers =
					is_slot_available(candidate, duration, &markers);

				assert_eq!(
					by_interval, by_markers,
					"disagreement at {candidate} for {duration}h",
				);
			}
		}
	}

	#[test]
	fn conflict_rejection_and_adjacent_acceptance() {
		// existing confirmed reservation at 14:00 for 2h
		let existing = vec![Interval::new(time(14, 0), 2)];

		// 15:00 for 1h overlaps [14:00, 16:00)
		assert!(!is_interval_free(
			Interval::new(time(15, 0), 1),
			&existing,
		));

		// 16:00 for 1h is adjacent and must be accepted
		assert!(is_interval_free(Interval::new(time(16, 0), 1), &existing));
	}
}
