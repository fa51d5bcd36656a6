#![allow(dead_code)]

pub mod mock_server;
pub mod scripted;

use hrm_client::model::Employee;
use serde_json::json;

pub fn employee(id: u64, name: &str, department: &str) -> Employee {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "position": "Engineer",
        "department": department,
        "phone": "",
        "date_joined": "2020-01-01",
        "salary": "50000.00"
    }))
    .unwrap()
}

pub fn names(records: &[Employee]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}
