//! Plain-text rendering of core view projections.

use chrono::NaiveDate;
use lifeweeks_core::format::format_date_key;
use lifeweeks_core::session::view::{summarize, week_range_label, DayOption, Frame};
use lifeweeks_core::{MemoryBook, MemoryChange, WeekCell, WeekPosition, WeekState};

const GLYPH_CURRENT: char = '@';
const GLYPH_PAST_MEMORY: char = '*';
const GLYPH_PAST: char = '#';
const GLYPH_FUTURE: char = '.';
const MEMORY_MARK: &str = "\u{25cf}";

pub fn stats_report(frame: &Frame) -> String {
    let summary = summarize(&frame.stats);
    let mut out = String::new();

    out.push_str("Time lived\n");
    for (value, label) in &summary.time_lived {
        out.push_str(&format!("  {value:>14}  {label}\n"));
    }
    out.push_str("\nBiological rhythms\n");
    for line in &summary.rhythms {
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str("\nPerspective\n");
    for line in &summary.perspective {
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str(&format!("\n{}\n", frame.footer()));
    out
}

pub fn grid_report(frame: &Frame) -> String {
    let mut out = String::new();
    for row in &frame.grid.rows {
        let dots: String = row.weeks.iter().map(glyph).collect();
        out.push_str(&format!("{:>9} {dots}\n", row.label()));
    }
    out.push_str(&format!(
        "\n{} this week  {} lived  {} lived with memory  {} ahead\n",
        GLYPH_CURRENT, GLYPH_PAST, GLYPH_PAST_MEMORY, GLYPH_FUTURE
    ));
    out.push_str(&format!("{}\n", frame.footer()));
    out
}

pub fn week_report(
    frame: &Frame,
    position: WeekPosition,
    options: &[DayOption],
    memories: &MemoryBook,
) -> String {
    let mut out = String::new();
    if let Some(cell) = frame.grid.cell(position) {
        out.push_str(&format!("{}\n", week_range_label(cell)));
    }
    for option in options {
        let mark = if option.has_memory { MEMORY_MARK } else { " " };
        out.push_str(&format!("  {mark} {}", option.label));
        if let Some(text) = memories.get(option.date) {
            out.push_str(&format!("  {text}"));
        }
        out.push('\n');
    }
    out
}

pub fn memory_list(entries: &[(NaiveDate, String)]) -> String {
    if entries.is_empty() {
        return "(no memories yet)\n".to_string();
    }
    entries
        .iter()
        .map(|(date, text)| format!("{}  {text}\n", format_date_key(*date)))
        .collect()
}

pub fn change_message(change: MemoryChange, date: NaiveDate) -> String {
    match change {
        MemoryChange::Stored => format!("Saved memory for {date}."),
        MemoryChange::Removed => format!("Cleared memory for {date}."),
        MemoryChange::Unchanged => format!("No memory for {date}; nothing to clear."),
    }
}

fn glyph(cell: &WeekCell) -> char {
    match cell.state {
        WeekState::Current => GLYPH_CURRENT,
        WeekState::Past if cell.has_memory => GLYPH_PAST_MEMORY,
        WeekState::Past => GLYPH_PAST,
        WeekState::Future => GLYPH_FUTURE,
    }
}

#[cfg(test)]
mod tests {
    use super::{change_message, grid_report, memory_list, stats_report};
    use chrono::NaiveDate;
    use lifeweeks_core::session::view::Frame;
    use lifeweeks_core::{
        build_grid, calculate_stats, BirthDate, LifeExpectancy, MemoryBook, MemoryChange,
    };

    fn frame() -> Frame {
        let stats = calculate_stats(
            BirthDate::parse("2000-01-15").unwrap(),
            LifeExpectancy::new(30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        )
        .unwrap();
        let grid = build_grid(&stats, &MemoryBook::new()).unwrap();
        Frame { stats, grid }
    }

    #[test]
    fn grid_report_marks_current_week() {
        let report = grid_report(&frame());
        let current_row = report.lines().nth(24).unwrap();
        assert!(current_row.starts_with("2024-2025 @"));
        assert_eq!(report.lines().next().unwrap().matches('#').count(), 52);
    }

    #[test]
    fn stats_report_groups_numbers() {
        let report = stats_report(&frame());
        assert!(report.contains("1,253"));
        assert!(report.contains("Your heart has beaten approximately 884,116,800 times"));
        assert!(report.contains("Year 25 of 30"));
    }

    #[test]
    fn empty_list_and_messages_are_readable() {
        assert_eq!(memory_list(&[]), "(no memories yet)\n");
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(
            change_message(MemoryChange::Removed, date),
            "Cleared memory for 2024-01-20."
        );
    }
}
