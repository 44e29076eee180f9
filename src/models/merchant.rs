//! Merchant domain model and row mapping.
//!
//! The external sheet is positional: each data row is a vector of string
//! cells, and which cell holds which field has changed between deployments.
//! The mapping is therefore configuration ([`ColumnMap`]), validated at
//! startup, and this module is the only place rows are turned into
//! [`Merchant`] records — both the UI-facing and server-facing paths share it.

// Allow dead code: display helpers are driven by the UI
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A merchant row, materialized from the sheet.
///
/// `id` is derived from row position at read time and is not stable across
/// re-reads; writes are keyed by `business_name` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    pub business_name: String,
    pub category: String,
    pub sub_category: String,
    pub address: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub status: String,
    pub assigned_to: Option<String>,
    /// Display glyph resolved from (category, sub_category); always set.
    #[serde(default)]
    pub icon: String,
}

impl Merchant {
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    /// Phone for display; absent values render as placeholder text rather
    /// than being omitted.
    pub fn phone_display(&self) -> &str {
        if self.phone.trim().is_empty() {
            "No phone"
        } else {
            &self.phone
        }
    }

    pub fn email_display(&self) -> &str {
        if self.email.trim().is_empty() {
            "No email"
        } else {
            &self.email
        }
    }
}

/// Where the address lives in a row.
///
/// Some deployments keep a single pre-formatted address column; others split
/// it into sub-fields that we synthesize into one line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressColumns {
    /// One column already holding the full address.
    Column(usize),
    /// Street-level sub-fields, joined by [`format_address`].
    Composite {
        number: usize,
        street: usize,
        street_alt: usize,
        town: usize,
        state: usize,
    },
}

/// Field -> column index table for the merchant range.
///
/// Optional fields (`sub_category`, `status`) are absent in some layouts;
/// `status` defaults to `"active"` when unmapped or blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMap {
    pub business_name: usize,
    pub category: usize,
    pub sub_category: Option<usize>,
    pub address: AddressColumns,
    pub contact_person: usize,
    pub phone: usize,
    pub email: usize,
    pub status: Option<usize>,
    pub assigned_to: usize,
}

impl Default for ColumnMap {
    /// Layout of the production sheet: columns A..L with the address split
    /// across B-F (master street name in C, number in D), the category in H,
    /// and the assignee in L. Column G is unused.
    fn default() -> Self {
        Self {
            business_name: 0,
            category: 7,
            sub_category: None,
            address: AddressColumns::Composite {
                number: 3,
                street: 2,
                street_alt: 1,
                town: 4,
                state: 5,
            },
            contact_person: 10,
            phone: 8,
            email: 9,
            status: None,
            assigned_to: 11,
        }
    }
}

impl ColumnMap {
    /// Reject maps that point two fields at the same column. Schema drift is
    /// expected between deployments; a silently doubled index is a config
    /// typo, not a layout.
    pub fn validate(&self) -> Result<(), String> {
        let mut indices = vec![
            self.business_name,
            self.category,
            self.contact_person,
            self.phone,
            self.email,
            self.assigned_to,
        ];
        if let Some(i) = self.sub_category {
            indices.push(i);
        }
        if let Some(i) = self.status {
            indices.push(i);
        }
        match self.address {
            AddressColumns::Column(i) => indices.push(i),
            AddressColumns::Composite {
                number,
                street,
                street_alt,
                town,
                state,
            } => indices.extend([number, street, street_alt, town, state]),
        }

        indices.sort_unstable();
        for pair in indices.windows(2) {
            if pair[0] == pair[1] {
                return Err(format!("column index {} is mapped twice", pair[0]));
            }
        }
        Ok(())
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Map one raw data row to a merchant.
///
/// Returns `None` when the mapped business name is blank; those rows are
/// dropped during ingestion so the materialized collection never contains
/// nameless entries.
pub fn merchant_from_row(row: &[String], index: usize, map: &ColumnMap) -> Option<Merchant> {
    let business_name = cell(row, map.business_name).trim();
    if business_name.is_empty() {
        return None;
    }

    let address = match map.address {
        AddressColumns::Column(i) => cell(row, i).to_string(),
        AddressColumns::Composite {
            number,
            street,
            street_alt,
            town,
            state,
        } => format_address(
            cell(row, number),
            cell(row, street),
            cell(row, street_alt),
            cell(row, town),
            cell(row, state),
        ),
    };

    let status = map
        .status
        .map(|i| cell(row, i).trim())
        .filter(|s| !s.is_empty())
        .unwrap_or("active")
        .to_string();

    let assigned_to = Some(cell(row, map.assigned_to).trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let category = cell(row, map.category).trim().to_string();
    let sub_category = map
        .sub_category
        .map(|i| cell(row, i).trim().to_string())
        .unwrap_or_default();
    let icon = crate::icons::get_business_icon(&category, &sub_category).to_string();

    Some(Merchant {
        id: format!("merchant_{}", index),
        business_name: business_name.to_string(),
        category,
        sub_category,
        address,
        contact_person: cell(row, map.contact_person).trim().to_string(),
        phone: cell(row, map.phone).trim().to_string(),
        email: cell(row, map.email).trim().to_string(),
        status,
        assigned_to,
        icon,
    })
}

/// Join address sub-fields into one display line.
///
/// Order: street number, then the first non-empty of {street, street_alt},
/// then town and state as `"town, state"`. Empty components are skipped so
/// the result never carries dangling separators.
pub fn format_address(
    number: &str,
    street: &str,
    street_alt: &str,
    town: &str,
    state: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    let number = number.trim();
    if !number.is_empty() {
        parts.push(number.to_string());
    }

    let street_name = Some(street.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(street_alt.trim());
    if !street_name.is_empty() {
        parts.push(street_name.to_string());
    }

    let town = town.trim();
    if !town.is_empty() {
        let state = state.trim();
        if state.is_empty() {
            parts.push(town.to_string());
        } else {
            parts.push(format!("{}, {}", town, state));
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_row_mapping_default_layout() {
        let map = ColumnMap::default();
        let r = row(&[
            "Tony's Pizza Palace",
            "Main St",
            "Main Street",
            "123",
            "Ridgewood",
            "NJ",
            "",
            "restaurant",
            "(201) 555-0123",
            "tony@tonypizza.com",
            "Tony Rossi",
            "Sarah Johnson",
        ]);

        let m = merchant_from_row(&r, 0, &map).unwrap();
        assert_eq!(m.id, "merchant_0");
        assert_eq!(m.business_name, "Tony's Pizza Palace");
        assert_eq!(m.category, "restaurant");
        assert_eq!(m.sub_category, "");
        assert_eq!(m.address, "123 Main Street Ridgewood, NJ");
        assert_eq!(m.contact_person, "Tony Rossi");
        assert_eq!(m.phone, "(201) 555-0123");
        assert_eq!(m.assigned_to.as_deref(), Some("Sarah Johnson"));
        assert_eq!(m.icon, "🍽️");
        assert!(m.is_assigned());
    }

    #[test]
    fn test_blank_name_row_is_dropped() {
        let map = ColumnMap::default();
        assert!(merchant_from_row(&row(&["   ", "retail"]), 0, &map).is_none());
        assert!(merchant_from_row(&row(&[]), 0, &map).is_none());
    }

    #[test]
    fn test_status_defaults_to_active() {
        // Default layout has no status column
        let m = merchant_from_row(&row(&["Shop"]), 3, &ColumnMap::default()).unwrap();
        assert_eq!(m.status, "active");

        let with_status = ColumnMap {
            status: Some(6),
            ..ColumnMap::default()
        };
        let m = merchant_from_row(&row(&["Shop", "", "", "", "", "", "pending"]), 3, &with_status)
            .unwrap();
        assert_eq!(m.status, "pending");

        let m = merchant_from_row(&row(&["Shop", "", "", "", "", "", "  "]), 3, &with_status)
            .unwrap();
        assert_eq!(m.status, "active");
    }

    #[test]
    fn test_empty_assignee_is_unassigned() {
        let map = ColumnMap::default();
        let m = merchant_from_row(&row(&["Shop", "retail", "", "", "", "", "", "", "", "", "", "  "]), 0, &map)
            .unwrap();
        assert_eq!(m.assigned_to, None);
        assert!(!m.is_assigned());
    }

    #[test]
    fn test_single_column_address_mapping() {
        // Alternate layout: one pre-formatted address column, explicit
        // sub-category and status columns
        let map = ColumnMap {
            category: 1,
            sub_category: Some(2),
            address: AddressColumns::Column(3),
            contact_person: 4,
            phone: 5,
            email: 6,
            status: Some(7),
            ..ColumnMap::default()
        };
        let r = row(&[
            "Green Garden Market",
            "retail",
            "grocery",
            "987 Maple Drive, Ridgewood, NJ 07450",
            "Tom Anderson",
            "(201) 555-0987",
            "tom@greengardenmarket.com",
            "active",
            "",
            "",
            "",
            "",
        ]);

        let m = merchant_from_row(&r, 5, &map).unwrap();
        assert_eq!(m.address, "987 Maple Drive, Ridgewood, NJ 07450");
        assert_eq!(m.sub_category, "grocery");
        assert_eq!(m.icon, "🛒");
        assert_eq!(m.assigned_to, None);
    }

    #[test]
    fn test_format_address_full() {
        assert_eq!(
            format_address("12", "Main St", "", "Ridgewood", "NJ"),
            "12 Main St Ridgewood, NJ"
        );
    }

    #[test]
    fn test_format_address_town_only() {
        assert_eq!(format_address("", "", "", "Ridgewood", ""), "Ridgewood");
    }

    #[test]
    fn test_format_address_prefers_primary_street() {
        assert_eq!(
            format_address("5", "Oak Ave", "Oak Avenue", "", ""),
            "5 Oak Ave"
        );
        assert_eq!(
            format_address("5", "  ", "Oak Avenue", "", ""),
            "5 Oak Avenue"
        );
    }

    #[test]
    fn test_format_address_empty() {
        assert_eq!(format_address("", "", "", "", ""), "");
    }

    #[test]
    fn test_column_map_validation() {
        assert!(ColumnMap::default().validate().is_ok());

        let doubled = ColumnMap {
            phone: 9, // collides with email
            ..ColumnMap::default()
        };
        assert!(doubled.validate().is_err());
    }

    #[test]
    fn test_contact_placeholders() {
        let m = Merchant {
            id: "merchant_0".into(),
            business_name: "Shop".into(),
            category: String::new(),
            sub_category: String::new(),
            address: String::new(),
            contact_person: String::new(),
            phone: String::new(),
            email: "a@b.com".into(),
            status: "active".into(),
            assigned_to: None,
            icon: "🏢".into(),
        };
        assert_eq!(m.phone_display(), "No phone");
        assert_eq!(m.email_display(), "a@b.com");
    }
}
