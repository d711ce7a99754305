use chrono::NaiveDate;
use lifeweeks_core::session::state::TooltipAnchor;
use lifeweeks_core::{
    Action, CellRect, Clock, FixedClock, InMemoryKeyValueStore, KeyValueStore, KvError,
    KvResult, LifeCalendar, MemoryStore, Overlay, WeekPosition,
};
use std::cell::Cell;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rect() -> CellRect {
    CellRect {
        left: 40.0,
        top: 300.0,
        width: 8.0,
        height: 8.0,
    }
}

fn started<'a>(
    backend: &'a InMemoryKeyValueStore,
) -> LifeCalendar<&'a InMemoryKeyValueStore, FixedClock> {
    let mut calendar = LifeCalendar::new(MemoryStore::new(backend), FixedClock(day(2024, 1, 20)));
    calendar.dispatch(Action::EditBirthDate("2000-01-15".to_string()));
    assert!(calendar.visualize());
    calendar
}

struct SteppingClock(Cell<NaiveDate>);

impl Clock for SteppingClock {
    fn today(&self) -> NaiveDate {
        self.0.get()
    }
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Unavailable("read-only".to_string()))
    }
}

#[test]
fn visualize_is_inert_for_invalid_input() {
    let backend = InMemoryKeyValueStore::new();
    let mut calendar =
        LifeCalendar::new(MemoryStore::new(&backend), FixedClock(day(2024, 1, 20)));

    assert!(!calendar.visualize());

    calendar.dispatch(Action::EditBirthDate("2000-01-15".to_string()));
    calendar.dispatch(Action::EditLifeExpectancy("abc".to_string()));
    assert!(!calendar.visualize());

    calendar.dispatch(Action::EditLifeExpectancy("80".to_string()));
    calendar.dispatch(Action::EditBirthDate("2030-01-01".to_string()));
    assert!(!calendar.visualize());

    assert!(!calendar.state().is_visualizing());
    assert!(calendar.render().is_none());
}

#[test]
fn render_exposes_stats_grid_and_footer() {
    let backend = InMemoryKeyValueStore::new();
    let calendar = started(&backend);

    let frame = calendar.render().unwrap();
    assert_eq!(frame.stats.total_weeks_lived, 1253);
    assert_eq!(frame.grid.rows.len(), 80);
    assert_eq!(frame.footer(), "Year 25 of 80 \u{2022} Week 1 of 52");
}

#[test]
fn hover_shows_week_range_above_cell() {
    let backend = InMemoryKeyValueStore::new();
    let mut calendar = started(&backend);

    calendar.dispatch(Action::HoverWeek {
        position: WeekPosition::new(24, 0),
        rect: rect(),
    });
    let tooltip = calendar.tooltip().unwrap();
    assert_eq!(tooltip.text, "Jan 15 - Jan 21, 2024");
    assert_eq!(tooltip.anchor, TooltipAnchor { x: 44.0, y: 252.0 });

    calendar.dispatch(Action::LeaveWeek);
    assert!(calendar.tooltip().is_none());
}

#[test]
fn click_pick_edit_save_marks_week_and_persists() {
    let backend = InMemoryKeyValueStore::new();
    let mut calendar = started(&backend);

    calendar.dispatch(Action::ClickWeek(WeekPosition::new(24, 0)));
    let options = calendar.day_picker().unwrap();
    assert_eq!(options.len(), 7);
    assert_eq!(options[0].label, "Mon, Jan 15, 2024");
    assert!(options.iter().all(|option| !option.has_memory));

    calendar.dispatch(Action::SelectDay(day(2024, 1, 17)));
    let editor = calendar.editor().unwrap();
    assert_eq!(editor.date_label, "Wed, Jan 17, 2024");
    assert_eq!(editor.draft, "");

    calendar.dispatch(Action::EditDraft("  Started a new job  ".to_string()));
    let outcome = calendar.save_memory().unwrap();
    assert!(outcome.persisted());
    assert_eq!(calendar.state().overlay, Overlay::Closed);

    let frame = calendar.render().unwrap();
    assert!(frame.grid.cell(WeekPosition::new(24, 0)).unwrap().has_memory);
    assert_eq!(
        backend
            .get("life-weeks-memories-2000-01-15")
            .unwrap()
            .as_deref(),
        Some(r#"{"2024-01-17":"Started a new job"}"#)
    );
}

#[test]
fn cancel_leaves_memories_untouched() {
    let backend = InMemoryKeyValueStore::new();
    let mut calendar = started(&backend);

    calendar.dispatch(Action::ClickWeek(WeekPosition::new(3, 7)));
    let first = calendar.day_picker().unwrap()[0].date;
    calendar.dispatch(Action::SelectDay(first));
    calendar.dispatch(Action::EditDraft("draft only".to_string()));
    calendar.dispatch(Action::CloseEditor);

    assert_eq!(calendar.state().overlay, Overlay::Closed);
    assert!(calendar.save_memory().is_none());
    assert!(backend.is_empty());
}

#[test]
fn start_over_then_visualize_reloads_persisted_memories() {
    let backend = InMemoryKeyValueStore::new();
    let mut calendar = started(&backend);

    calendar.dispatch(Action::ClickWeek(WeekPosition::new(24, 0)));
    calendar.dispatch(Action::SelectDay(day(2024, 1, 20)));
    calendar.dispatch(Action::EditDraft("today".to_string()));
    calendar.save_memory().unwrap();

    calendar.dispatch(Action::StartOver);
    assert!(!calendar.state().is_visualizing());
    assert!(calendar.render().is_none());

    assert!(calendar.visualize());
    calendar.dispatch(Action::ClickWeek(WeekPosition::new(24, 0)));
    let options = calendar.day_picker().unwrap();
    assert!(options[5].has_memory);
    assert_eq!(options.iter().filter(|option| option.has_memory).count(), 1);
}

#[test]
fn failed_save_still_updates_view() {
    let mut calendar = LifeCalendar::new(
        MemoryStore::new(ReadOnlyStore),
        FixedClock(day(2024, 1, 20)),
    );
    calendar.dispatch(Action::EditBirthDate("2000-01-15".to_string()));
    assert!(calendar.visualize());

    calendar.dispatch(Action::ClickWeek(WeekPosition::new(24, 0)));
    calendar.dispatch(Action::SelectDay(day(2024, 1, 18)));
    calendar.dispatch(Action::EditDraft("unsaved".to_string()));
    let outcome = calendar.save_memory().unwrap();

    assert!(!outcome.persisted());
    let frame = calendar.render().unwrap();
    assert!(frame.grid.cell(WeekPosition::new(24, 0)).unwrap().has_memory);
}

#[test]
fn each_render_reads_the_clock() {
    let backend = InMemoryKeyValueStore::new();
    let clock = SteppingClock(Cell::new(day(2024, 1, 21)));
    let mut calendar = LifeCalendar::new(MemoryStore::new(&backend), &clock);
    calendar.dispatch(Action::EditBirthDate("2000-01-15".to_string()));
    assert!(calendar.visualize());

    assert_eq!(calendar.render().unwrap().stats.week_in_year, 0);
    clock.0.set(day(2024, 1, 22));
    let frame = calendar.render().unwrap();
    assert_eq!(frame.stats.week_in_year, 1);
    assert_eq!(frame.grid.current().unwrap().position, WeekPosition::new(24, 1));
}
