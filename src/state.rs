//! View state store.
//!
//! Every logical action goes through [`Store::dispatch`], which derives a new
//! immutable [`ViewState`] snapshot from the current one. The record list is
//! only ever replaced wholesale by a fetch completion; nothing patches it.

use std::rc::Rc;

use tracing::debug;

use crate::api::FailureKind;
use crate::form::{FieldError, FormError, FormState, OpenForm};
use crate::model::{DraftField, Employee, EmployeeId};

/// Page-level lifecycle. Moves forward only: `Initial -> Loading -> Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Initial,
    Loading,
    Ready,
}

/// Sequence number carried by every outgoing list/search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub records: Rc<Vec<Employee>>,
    pub search_term: String,
    pub phase: Phase,
    pub form: FormState,
}

impl ViewState {
    /// True until the first fetch completes, never again afterwards.
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_open()
    }

    pub fn editing_record(&self) -> Option<&Employee> {
        self.form.editing()
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|record| &record.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    LoadStarted,
    SearchTermChanged(String),
    FetchSucceeded {
        ticket: FetchTicket,
        records: Vec<Employee>,
    },
    FetchFailed {
        ticket: FetchTicket,
        kind: FailureKind,
    },
    OpenCreate,
    OpenEdit(Employee),
    DraftEdited {
        field: DraftField,
        value: String,
    },
    FormCancelled,
    SubmitInvalid(Vec<FieldError>),
    SubmitFailed(FormError),
    SubmitSucceeded,
}

#[derive(Debug, Default)]
pub struct Store {
    current: Rc<ViewState>,
    latest_ticket: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Rc<ViewState> {
        Rc::clone(&self.current)
    }

    /// Issue the ticket for a new list/search request, superseding all
    /// earlier ones.
    pub fn issue_ticket(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    pub fn dispatch(&mut self, action: Action) -> Rc<ViewState> {
        let next = match action {
            Action::FetchSucceeded { ticket, records } if !self.is_latest(ticket) => {
                debug!(
                    ticket = ticket.value(),
                    latest = self.latest_ticket,
                    discarded = records.len(),
                    "Discarding stale fetch result"
                );
                settle(&self.current)
            }
            action => reduce(&self.current, action),
        };
        self.current = Rc::new(next);
        self.snapshot()
    }
}

/// Clear the initial loading phase without touching anything else.
fn settle(state: &ViewState) -> ViewState {
    ViewState {
        phase: Phase::Ready,
        ..state.clone()
    }
}

fn reduce(state: &ViewState, action: Action) -> ViewState {
    match action {
        Action::LoadStarted => match state.phase {
            Phase::Initial => ViewState {
                phase: Phase::Loading,
                ..state.clone()
            },
            _ => state.clone(),
        },
        Action::SearchTermChanged(search_term) => ViewState {
            search_term,
            ..state.clone()
        },
        Action::FetchSucceeded { records, .. } => ViewState {
            records: Rc::new(records),
            ..settle(state)
        },
        // The previous list stays on screen; only the spinner goes away.
        Action::FetchFailed { .. } => settle(state),
        Action::OpenCreate if !state.form.is_open() => ViewState {
            form: FormState::open_create(),
            ..state.clone()
        },
        Action::OpenEdit(record) if !state.form.is_open() => ViewState {
            form: FormState::open_edit(&record),
            ..state.clone()
        },
        Action::OpenCreate | Action::OpenEdit(_) => {
            debug!("Form already open; ignoring open request");
            state.clone()
        }
        Action::DraftEdited { field, value } => with_open_form(state, |form| {
            form.draft.set(field, value);
        }),
        Action::FormCancelled | Action::SubmitSucceeded => ViewState {
            form: FormState::Closed,
            ..state.clone()
        },
        Action::SubmitInvalid(field_errors) => with_open_form(state, |form| {
            form.field_errors = field_errors;
            form.error = None;
        }),
        Action::SubmitFailed(error) => with_open_form(state, |form| {
            form.field_errors.clear();
            form.error = Some(error);
        }),
    }
}

fn with_open_form(state: &ViewState, edit: impl FnOnce(&mut OpenForm)) -> ViewState {
    let mut next = state.clone();
    match next.form.as_open_mut() {
        Some(form) => edit(form),
        None => debug!("No open form; ignoring form action"),
    }
    next
}
