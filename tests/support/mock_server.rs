//! In-process stand-in for the employee REST API, shaped like the Django
//! backend: trailing-slash routes, decimal salaries as strings, name ordering,
//! and a case-insensitive search over name, department and position.

use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{HttpRequest, HttpResponse, HttpServer, App, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEPARTMENTS: [&str; 6] = ["HR", "IT", "FINANCE", "MARKETING", "SALES", "OPERATIONS"];

#[derive(Debug, Clone, Serialize)]
pub struct StoredEmployee {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub phone: String,
    pub date_joined: String,
    pub salary: String,
    pub created_at: String,
    pub updated_at: String,
}

impl StoredEmployee {
    pub fn seed(id: u64, name: &str, department: &str, position: &str, salary: &str) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            position: position.to_string(),
            department: department.to_string(),
            phone: String::new(),
            date_joined: "2020-01-01".to_string(),
            salary: salary.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmployeeBody {
    name: String,
    email: String,
    position: String,
    department: String,
    #[serde(default)]
    phone: String,
    date_joined: String,
    salary: String,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub employees: Vec<StoredEmployee>,
    /// `"METHOD /path?query"` for every request received.
    pub requests: Vec<String>,
    /// Raw `q` values as decoded by the server.
    pub search_terms: Vec<String>,
    pub fail_writes: bool,
    next_id: u64,
}

impl MockBackend {
    fn record(&mut self, req: &HttpRequest) {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default();
        self.requests.push(format!("{} {}", req.method(), target));
    }

    fn ordered(&self, mut rows: Vec<StoredEmployee>) -> Vec<StoredEmployee> {
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Field errors in the `{"field": ["message"]}` shape.
    fn validate(&self, body: &EmployeeBody, except: Option<u64>) -> Option<serde_json::Value> {
        let mut errors = serde_json::Map::new();
        for (field, value) in [
            ("name", &body.name),
            ("email", &body.email),
            ("position", &body.position),
        ] {
            if value.trim().is_empty() {
                errors.insert(field.into(), json!(["This field may not be blank."]));
            }
        }
        if !DEPARTMENTS.contains(&body.department.as_str()) {
            errors.insert(
                "department".into(),
                json!([format!("\"{}\" is not a valid choice.", body.department)]),
            );
        }
        if NaiveDate::parse_from_str(&body.date_joined, "%Y-%m-%d").is_err() {
            errors.insert("date_joined".into(), json!(["Date has wrong format."]));
        }
        if body.salary.trim().parse::<f64>().is_err() {
            errors.insert("salary".into(), json!(["A valid number is required."]));
        }
        let taken = self
            .employees
            .iter()
            .any(|e| e.email == body.email && Some(e.id) != except);
        if taken {
            errors.insert(
                "email".into(),
                json!(["employee with this email already exists."]),
            );
        }
        if errors.is_empty() { None } else { Some(errors.into()) }
    }

    fn apply(&self, id: u64, body: EmployeeBody, created_at: String) -> StoredEmployee {
        let salary = body.salary.trim().parse::<f64>().unwrap_or_default();
        StoredEmployee {
            id,
            name: body.name,
            email: body.email,
            position: body.position,
            department: body.department,
            phone: body.phone,
            date_joined: body.date_joined,
            salary: format!("{salary:.2}"),
            created_at,
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}

type Backend = web::Data<Mutex<MockBackend>>;

async fn list_employees(backend: Backend, req: HttpRequest) -> HttpResponse {
    let mut backend = backend.lock().unwrap();
    backend.record(&req);
    let rows = backend.ordered(backend.employees.clone());
    HttpResponse::Ok().json(rows)
}

async fn search_employees(
    backend: Backend,
    req: HttpRequest,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let mut backend = backend.lock().unwrap();
    backend.record(&req);
    backend.search_terms.push(query.q.clone());

    let needle = query.q.to_lowercase();
    let rows: Vec<_> = backend
        .employees
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.name.to_lowercase().contains(&needle)
                || e.department.to_lowercase().contains(&needle)
                || e.position.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    HttpResponse::Ok().json(backend.ordered(rows))
}

async fn create_employee(
    backend: Backend,
    req: HttpRequest,
    body: web::Json<EmployeeBody>,
) -> HttpResponse {
    let mut backend = backend.lock().unwrap();
    backend.record(&req);
    if backend.fail_writes {
        return HttpResponse::InternalServerError().finish();
    }
    if let Some(errors) = backend.validate(&body, None) {
        return HttpResponse::BadRequest().json(errors);
    }

    backend.next_id += 1;
    let id = backend.next_id;
    let created = backend.apply(id, body.into_inner(), Utc::now().to_rfc3339());
    backend.employees.push(created.clone());
    HttpResponse::Created().json(created)
}

async fn update_employee(
    backend: Backend,
    req: HttpRequest,
    path: web::Path<u64>,
    body: web::Json<EmployeeBody>,
) -> HttpResponse {
    let id = path.into_inner();
    let mut backend = backend.lock().unwrap();
    backend.record(&req);
    if backend.fail_writes {
        return HttpResponse::InternalServerError().finish();
    }
    let Some(index) = backend.employees.iter().position(|e| e.id == id) else {
        return HttpResponse::NotFound().json(json!({ "detail": "Not found." }));
    };
    if let Some(errors) = backend.validate(&body, Some(id)) {
        return HttpResponse::BadRequest().json(errors);
    }

    let created_at = backend.employees[index].created_at.clone();
    let updated = backend.apply(id, body.into_inner(), created_at);
    backend.employees[index] = updated.clone();
    HttpResponse::Ok().json(updated)
}

async fn delete_employee(backend: Backend, req: HttpRequest, path: web::Path<u64>) -> HttpResponse {
    let id = path.into_inner();
    let mut backend = backend.lock().unwrap();
    backend.record(&req);
    if backend.fail_writes {
        return HttpResponse::InternalServerError().finish();
    }
    let before = backend.employees.len();
    backend.employees.retain(|e| e.id != id);
    if backend.employees.len() == before {
        return HttpResponse::NotFound().json(json!({ "detail": "Not found." }));
    }
    HttpResponse::NoContent().finish()
}

pub struct MockServer {
    pub base_url: String,
    pub backend: Backend,
    handle: ServerHandle,
}

impl MockServer {
    /// Bind to an ephemeral port and serve until `stop`.
    pub async fn start(seed: Vec<StoredEmployee>) -> Self {
        let next_id = seed.iter().map(|e| e.id).max().unwrap_or(0);
        let backend = web::Data::new(Mutex::new(MockBackend {
            employees: seed,
            next_id,
            ..MockBackend::default()
        }));

        let data = backend.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .service(
                    web::resource("/api/employees/")
                        .route(web::get().to(list_employees))
                        .route(web::post().to(create_employee)),
                )
                .service(
                    web::resource("/api/employees/search/").route(web::get().to(search_employees)),
                )
                .service(
                    web::resource("/api/employees/{id}/")
                        .route(web::put().to(update_employee))
                        .route(web::delete().to(delete_employee)),
                )
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/api"),
            backend,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.backend.lock().unwrap().requests.clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.backend.lock().unwrap().fail_writes = fail;
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
