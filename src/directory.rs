//! One entry point per user action, tying the remote client to the store.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::api::{ApiResult, EmployeeApi, FailureKind};
use crate::form::{self, FieldError, FormError, FormMode};
use crate::model::{DraftField, Employee, EmployeeId};
use crate::state::{Action, Store, ViewState};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

/// Blocking yes/no question put to the user before a delete.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Employee),
    Updated(Employee),
    /// The server accepted the write but its reply could not be read.
    Saved,
    /// Client-side checks failed; nothing was sent.
    Invalid(Vec<FieldError>),
    Failed(FailureKind),
    /// Submit with no open form.
    NotOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed(FailureKind),
}

enum Fetch<'a> {
    All,
    Search(&'a str),
}

/// Employee list page: remote client plus view state.
///
/// Single-threaded. Several actions may be in flight at once (e.g. searches
/// fired on each keystroke); the store is never borrowed across an await.
pub struct EmployeeDirectory<A> {
    api: A,
    store: RefCell<Store>,
}

impl<A: EmployeeApi> EmployeeDirectory<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: RefCell::new(Store::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> Rc<ViewState> {
        self.store.borrow().snapshot()
    }

    fn dispatch(&self, action: Action) -> Rc<ViewState> {
        self.store.borrow_mut().dispatch(action)
    }

    /// Initial page load.
    pub async fn load(&self) -> Rc<ViewState> {
        self.dispatch(Action::LoadStarted);
        self.fetch(Fetch::All).await
    }

    /// Full list refetch, used after every confirmed mutation.
    pub async fn refresh(&self) -> Rc<ViewState> {
        self.fetch(Fetch::All).await
    }

    pub async fn search(&self, term: impl Into<String>) -> Rc<ViewState> {
        let term = term.into();
        self.dispatch(Action::SearchTermChanged(term.clone()));
        self.fetch(Fetch::Search(&term)).await
    }

    async fn fetch(&self, request: Fetch<'_>) -> Rc<ViewState> {
        let ticket = self.store.borrow_mut().issue_ticket();
        debug!(ticket = ticket.value(), "Issuing fetch");

        let result: ApiResult<Vec<Employee>> = match request {
            Fetch::All => self.api.list_all().await,
            Fetch::Search(term) => self.api.search(term).await,
        };

        match result {
            Ok(records) => self.dispatch(Action::FetchSucceeded { ticket, records }),
            Err(e) => {
                error!(error = %e, ticket = ticket.value(), "Error fetching employees");
                self.dispatch(Action::FetchFailed {
                    ticket,
                    kind: e.kind(),
                })
            }
        }
    }

    pub fn open_create(&self) -> Rc<ViewState> {
        self.dispatch(Action::OpenCreate)
    }

    /// Open the form on a copy of the listed record `id`.
    pub fn open_edit(&self, id: &EmployeeId) -> Rc<ViewState> {
        let record = self.state().find(id).cloned();
        match record {
            Some(record) => self.dispatch(Action::OpenEdit(record)),
            None => {
                warn!(%id, "Edit requested for an employee that is not listed");
                self.state()
            }
        }
    }

    pub fn edit_draft(&self, field: DraftField, value: impl Into<String>) -> Rc<ViewState> {
        self.dispatch(Action::DraftEdited {
            field,
            value: value.into(),
        })
    }

    pub fn cancel_form(&self) -> Rc<ViewState> {
        self.dispatch(Action::FormCancelled)
    }

    /// Create or update depending on how the form was opened.
    ///
    /// On success the form closes and the list is refetched. On failure the
    /// form stays open with the draft as the user left it.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(form) = self.state().form.as_open().cloned() else {
            return SubmitOutcome::NotOpen;
        };

        if let Err(errors) = form::validate(&form.draft) {
            debug!(count = errors.len(), "Draft failed client-side checks");
            self.dispatch(Action::SubmitInvalid(errors.clone()));
            return SubmitOutcome::Invalid(errors);
        }

        let result = match &form.mode {
            FormMode::Edit(record) => self
                .api
                .update(&record.id, &form.draft)
                .await
                .map(SubmitOutcome::Updated),
            FormMode::Create => self.api.create(&form.draft).await.map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                info!(?outcome, "Employee saved");
                self.dispatch(Action::SubmitSucceeded);
                self.refresh().await;
                outcome
            }
            // A 2xx came back, so the record is stored. Keeping the form open
            // would invite a duplicate on resubmit.
            Err(e) if e.kind() == FailureKind::Decode => {
                warn!(error = %e, "Employee saved but the reply was unreadable");
                self.dispatch(Action::SubmitSucceeded);
                self.refresh().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                error!(error = %e, "Error saving employee");
                let kind = e.kind();
                self.dispatch(Action::SubmitFailed(FormError::save_failed(kind)));
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// Delete after confirmation. A declined prompt sends nothing; a failed
    /// call is logged and leaves the list as it is.
    pub async fn delete(&self, id: &EmployeeId, confirm: &impl Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        match self.api.remove(id).await {
            Ok(()) => {
                info!(%id, "Employee deleted");
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, %id, "Error deleting employee");
                DeleteOutcome::Failed(e.kind())
            }
        }
    }
}
