//! Effectful controller around the view reducer.
//!
//! # Responsibility
//! - Gate visualization on valid input and load memories once on start.
//! - Persist edits through `MemoryStore`, optimistically.
//! - Derive frames, tooltip, picker and editor views per call.

use crate::calendar::clock::Clock;
use crate::calendar::grid::{build_grid, week_dates};
use crate::calendar::stats::calculate_stats;
use crate::format::format_full;
use crate::model::life::{BirthDate, LifeExpectancy};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::memory_service::{MemoryStore, SaveOutcome};
use crate::session::state::{reduce, Action, Overlay, ViewState};
use crate::session::view::{day_options, week_range_label, DayOption, EditorView, Frame, Tooltip};
use log::{info, warn};

/// Single-user life calendar session.
pub struct LifeCalendar<S: KeyValueStore, C: Clock> {
    store: MemoryStore<S>,
    clock: C,
    state: ViewState,
}

impl<S: KeyValueStore, C: Clock> LifeCalendar<S, C> {
    pub fn new(store: MemoryStore<S>, clock: C) -> Self {
        Self {
            store,
            clock,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &MemoryStore<S> {
        &self.store
    }

    /// Applies a pure transition.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
    }

    /// Starts the visualization from the form.
    ///
    /// Returns `false` and leaves state unchanged when the form is
    /// incomplete, malformed or names a birth date after today.
    pub fn visualize(&mut self) -> bool {
        let birth_date = match BirthDate::parse(&self.state.form.birth_date) {
            Ok(value) => value,
            Err(err) => {
                info!("event=visualize module=session status=rejected reason={err}");
                return false;
            }
        };
        let life_expectancy = match LifeExpectancy::parse(&self.state.form.life_expectancy) {
            Ok(value) => value,
            Err(err) => {
                info!("event=visualize module=session status=rejected reason={err}");
                return false;
            }
        };
        if let Err(err) = calculate_stats(birth_date, life_expectancy, self.clock.today()) {
            info!("event=visualize module=session status=rejected reason={err}");
            return false;
        }

        let memories = self.store.load(birth_date);
        info!(
            "event=visualize module=session status=ok life_expectancy={} memories={}",
            life_expectancy,
            memories.len()
        );
        self.dispatch(Action::Started {
            birth_date,
            life_expectancy,
            memories,
        });
        true
    }

    /// Saves the editor draft and closes the editor.
    ///
    /// Returns `None` when no editor is open.
    pub fn save_memory(&mut self) -> Option<SaveOutcome> {
        let (date, draft) = match &self.state.overlay {
            Overlay::MemoryEditor { date, draft } => (*date, draft.clone()),
            _ => return None,
        };
        let session = self.state.session.as_ref()?;
        let mut memories = session.memories.clone();
        let outcome = self
            .store
            .save_memory(session.birth_date, &mut memories, date, &draft);
        if !outcome.persisted() {
            warn!("event=memory_save module=session status=degraded mode=local_only");
        }
        self.dispatch(Action::Saved(memories));
        Some(outcome)
    }

    /// Derives stats and grid for today. `None` before visualization.
    pub fn render(&self) -> Option<Frame> {
        let session = self.state.session.as_ref()?;
        let today = self.clock.today();
        let stats = match calculate_stats(session.birth_date, session.life_expectancy, today) {
            Ok(stats) => stats,
            Err(err) => {
                warn!("event=render module=session status=error error={err}");
                return None;
            }
        };
        let grid = match build_grid(&stats, &session.memories) {
            Ok(grid) => grid,
            Err(err) => {
                warn!("event=render module=session status=error error={err}");
                return None;
            }
        };
        Some(Frame { stats, grid })
    }

    /// Tooltip for the hovered cell.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let hover = self.state.hovered?;
        let frame = self.render()?;
        let cell = frame.grid.cell(hover.position)?;
        Some(Tooltip {
            text: week_range_label(cell),
            anchor: hover.anchor,
        })
    }

    /// Picker rows for the clicked week.
    pub fn day_picker(&self) -> Option<Vec<DayOption>> {
        let position = match self.state.overlay {
            Overlay::DayPicker(position) => position,
            _ => return None,
        };
        let session = self.state.session.as_ref()?;
        let dates = week_dates(session.birth_date, position)?;
        Some(day_options(&dates, &session.memories))
    }

    /// Editor modal content.
    pub fn editor(&self) -> Option<EditorView> {
        match &self.state.overlay {
            Overlay::MemoryEditor { date, draft } => Some(EditorView {
                date: *date,
                date_label: format_full(*date),
                draft: draft.clone(),
            }),
            _ => None,
        }
    }
}
