//! View state record and reducer.

use crate::model::life::{BirthDate, LifeExpectancy, DEFAULT_LIFE_EXPECTANCY};
use crate::model::memory::MemoryBook;
use crate::model::week::WeekPosition;
use chrono::NaiveDate;

/// Grid rows are roughly 8px apart (6px dot + 2px gap).
pub const TOOLTIP_ROW_HEIGHT: f64 = 8.0;
/// Tooltip floats this many rows above the hovered dot.
pub const TOOLTIP_OFFSET_ROWS: f64 = 6.0;

/// Raw form fields, kept as typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub birth_date: String,
    pub life_expectancy: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            birth_date: String::new(),
            life_expectancy: DEFAULT_LIFE_EXPECTANCY.to_string(),
        }
    }
}

/// Screen rectangle of a hovered dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Tooltip anchor point: horizontally centred, fixed rows above the dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub x: f64,
    pub y: f64,
}

impl TooltipAnchor {
    pub fn above(rect: CellRect) -> Self {
        Self {
            x: rect.left + rect.width / 2.0,
            y: rect.top - TOOLTIP_ROW_HEIGHT * TOOLTIP_OFFSET_ROWS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub position: WeekPosition,
    pub anchor: TooltipAnchor,
}

/// Modal layer above the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Closed,
    /// Seven-day picker for a clicked week.
    DayPicker(WeekPosition),
    /// Text editor for one day's memory.
    MemoryEditor { date: NaiveDate, draft: String },
}

/// Active visualization; inputs are frozen once started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub birth_date: BirthDate,
    pub life_expectancy: LifeExpectancy,
    pub memories: MemoryBook,
}

/// Complete view snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub form: FormInput,
    pub session: Option<Session>,
    pub hovered: Option<Hover>,
    pub overlay: Overlay,
}

impl ViewState {
    pub fn is_visualizing(&self) -> bool {
        self.session.is_some()
    }
}

/// State transitions. Effects (load/save) happen before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditBirthDate(String),
    EditLifeExpectancy(String),
    /// Visualization starts with the memories loaded for `birth_date`.
    Started {
        birth_date: BirthDate,
        life_expectancy: LifeExpectancy,
        memories: MemoryBook,
    },
    HoverWeek {
        position: WeekPosition,
        rect: CellRect,
    },
    LeaveWeek,
    ClickWeek(WeekPosition),
    DismissPicker,
    /// Opens the editor prefilled with the day's memory.
    SelectDay(NaiveDate),
    EditDraft(String),
    /// Save completed locally; the editor closes.
    Saved(MemoryBook),
    CloseEditor,
    StartOver,
}

/// Pure reducer: returns the next snapshot.
pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();
    match action {
        Action::EditBirthDate(value) => {
            if next.session.is_none() {
                next.form.birth_date = value;
            }
        }
        Action::EditLifeExpectancy(value) => {
            if next.session.is_none() {
                next.form.life_expectancy = value;
            }
        }
        Action::Started {
            birth_date,
            life_expectancy,
            memories,
        } => {
            next.session = Some(Session {
                birth_date,
                life_expectancy,
                memories,
            });
            next.hovered = None;
            next.overlay = Overlay::Closed;
        }
        Action::HoverWeek { position, rect } => {
            if next.session.is_some() {
                next.hovered = Some(Hover {
                    position,
                    anchor: TooltipAnchor::above(rect),
                });
            }
        }
        Action::LeaveWeek => next.hovered = None,
        Action::ClickWeek(position) => {
            if next.session.is_some() && next.overlay == Overlay::Closed {
                next.overlay = Overlay::DayPicker(position);
            }
        }
        Action::DismissPicker => {
            if matches!(next.overlay, Overlay::DayPicker(_)) {
                next.overlay = Overlay::Closed;
            }
        }
        Action::SelectDay(date) => {
            if matches!(next.overlay, Overlay::DayPicker(_)) {
                if let Some(session) = &next.session {
                    let draft = session.memories.get(date).unwrap_or_default().to_string();
                    next.overlay = Overlay::MemoryEditor { date, draft };
                }
            }
        }
        Action::EditDraft(text) => {
            if let Overlay::MemoryEditor { draft, .. } = &mut next.overlay {
                *draft = text;
            }
        }
        Action::Saved(memories) => {
            if let Some(session) = next.session.as_mut() {
                session.memories = memories;
            }
            next.overlay = Overlay::Closed;
        }
        Action::CloseEditor => {
            if matches!(next.overlay, Overlay::MemoryEditor { .. }) {
                next.overlay = Overlay::Closed;
            }
        }
        Action::StartOver => {
            next.session = None;
            next.hovered = None;
            next.overlay = Overlay::Closed;
        }
    }
    next
}
