//! In-memory `EmployeeApi` with scripted responses and a call log.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;
use hrm_client::api::{ApiError, ApiResult, EmployeeApi};
use hrm_client::model::{Employee, EmployeeDraft, EmployeeId};
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Search(String),
    Create(EmployeeDraft),
    Update(EmployeeId, EmployeeDraft),
    Remove(EmployeeId),
}

#[derive(Default)]
pub struct ScriptedApi {
    records: RefCell<Vec<Employee>>,
    searches: RefCell<HashMap<String, Vec<Employee>>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u64>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    /// Writes are stored but answered with an unreadable body.
    pub garble_write_replies: Cell<bool>,
}

impl ScriptedApi {
    pub fn new(records: Vec<Employee>) -> Self {
        Self {
            records: RefCell::new(records),
            next_id: Cell::new(100),
            ..Self::default()
        }
    }

    /// Fixed response for `search(term)`.
    pub fn script_search(&self, term: &str, records: Vec<Employee>) {
        self.searches.borrow_mut().insert(term.to_string(), records);
    }

    /// Hold `search(term)` until the returned sender fires.
    pub fn hold_search(&self, term: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.borrow_mut().insert(term.to_string(), gate);
        release
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn server_error() -> ApiError {
        ApiError::Server {
            status: 500,
            body: "Internal Server Error".into(),
        }
    }

    fn reply(&self, saved: Employee) -> ApiResult<Employee> {
        if self.garble_write_replies.get() {
            return Err(ApiError::Decode("expected value at line 1 column 1".into()));
        }
        Ok(saved)
    }

    fn persist(id: &EmployeeId, draft: &EmployeeDraft) -> Employee {
        serde_json::from_value(json!({
            "id": id.as_str(),
            "name": draft.name,
            "email": draft.email,
            "position": draft.position,
            "department": draft.department,
            "phone": draft.phone,
            "date_joined": draft.date_joined,
            "salary": draft.salary,
        }))
        .unwrap()
    }
}

#[async_trait(?Send)]
impl EmployeeApi for ScriptedApi {
    async fn list_all(&self) -> ApiResult<Vec<Employee>> {
        self.record(Call::List);
        if self.fail_reads.get() {
            return Err(Self::server_error());
        }
        Ok(self.records.borrow().clone())
    }

    async fn search(&self, term: &str) -> ApiResult<Vec<Employee>> {
        self.record(Call::Search(term.to_string()));
        let gate = self.gates.borrow_mut().remove(term);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_reads.get() {
            return Err(Self::server_error());
        }
        if let Some(scripted) = self.searches.borrow().get(term) {
            return Ok(scripted.clone());
        }
        let needle = term.to_lowercase();
        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.department.code().to_lowercase().contains(&needle)
                    || r.position.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &EmployeeDraft) -> ApiResult<Employee> {
        self.record(Call::Create(draft.clone()));
        if self.fail_writes.get() {
            return Err(Self::server_error());
        }
        let id = EmployeeId::from(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        let created = Self::persist(&id, draft);
        self.records.borrow_mut().push(created.clone());
        self.reply(created)
    }

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> ApiResult<Employee> {
        self.record(Call::Update(id.clone(), draft.clone()));
        if self.fail_writes.get() {
            return Err(Self::server_error());
        }
        let mut records = self.records.borrow_mut();
        let slot = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;
        *slot = Self::persist(id, draft);
        let updated = slot.clone();
        drop(records);
        self.reply(updated)
    }

    async fn remove(&self, id: &EmployeeId) -> ApiResult<()> {
        self.record(Call::Remove(id.clone()));
        if self.fail_writes.get() {
            return Err(Self::server_error());
        }
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(ApiError::NotFound("Employee not found".into()));
        }
        Ok(())
    }
}
