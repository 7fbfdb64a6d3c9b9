//! Interval plan table rendering.

use colored::Colorize;
use paceforge_spec::Interval;

/// Prints the interval plan as an aligned table, one row per interval.
/// Rows that close a stage are highlighted.
pub fn print_intervals(intervals: &[Interval]) {
    println!(
        "{}",
        format!(
            "{:>4}  {:>6}  {:>6}  {:>8}  {:>9}  {:>8}  {:>9}  {}",
            "#", "km/h", "m/s", "dur s", "total s", "dist m", "stage s", "change"
        )
        .bold()
    );

    for (i, interval) in intervals.iter().enumerate() {
        let row = format!(
            "{:>4}  {:>6.1}  {:>6.2}  {:>8.2}  {:>9.2}  {:>8}  {:>9.2}  {}",
            i + 1,
            interval.speed_kmh,
            interval.speed_ms,
            interval.duration_s,
            interval.total_end_s,
            interval.total_distance_end_m,
            interval.stage_time_end_s,
            if interval.stage_change_at_end { "yes" } else { "" }
        );
        if interval.stage_change_at_end {
            println!("{}", row.yellow());
        } else {
            println!("{}", row);
        }
    }
}

/// Prints the plan totals line.
pub fn print_summary(intervals: &[Interval]) {
    let last = match intervals.last() {
        Some(last) => last,
        None => return,
    };
    println!(
        "  {} {} intervals, {:.1} s, {} m",
        "Total:".dimmed(),
        intervals.len(),
        last.total_end_s,
        last.total_distance_end_m
    );
}
