//! Volunteer domain model.
//!
//! Volunteers are not separately persisted: they are implied by the assignee
//! column of the sheet and rebuilt in full on every read. Contact fields are
//! synthesized placeholders in the shape the UI expects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub active: bool,
}

impl Volunteer {
    fn from_name(name: &str, index: usize) -> Self {
        Self {
            id: format!("volunteer_{}", index),
            full_name: name.to_string(),
            email: placeholder_email(name),
            phone: placeholder_phone(index),
            role: "volunteer".to_string(),
            active: true,
        }
    }
}

fn placeholder_email(name: &str) -> String {
    let local: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase();
    format!("{}@email.com", local)
}

fn placeholder_phone(index: usize) -> String {
    format!("(201) 555-{:04}", 1000 + index)
}

/// Extract volunteers from the raw rows of the volunteers range.
///
/// Takes column 0 of each non-header row, trims, drops empties, and
/// deduplicates by exact name preserving first-seen order, so ids are
/// deterministic for a given sheet state.
pub fn volunteers_from_rows(rows: &[Vec<String>]) -> Vec<Volunteer> {
    let mut seen: Vec<&str> = Vec::new();

    for row in rows.iter().skip(1) {
        let name = row.first().map(String::as_str).unwrap_or("").trim();
        if name.is_empty() || seen.contains(&name) {
            continue;
        }
        seen.push(name);
    }

    seen.iter()
        .enumerate()
        .map(|(i, name)| Volunteer::from_name(name, i))
        .collect()
}
