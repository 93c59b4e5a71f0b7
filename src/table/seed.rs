//! Sample datasets handed to local tables at construction.
//!
//! Each call builds a fresh `Vec`; tables never share a dataset.

use crate::table::lead::Lead;
use crate::table::product::Product;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedDataset {
    Products,
    Dummy,
    Common,
    Leads,
}

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn demo_products(creators: &[&str], with_created_at: bool) -> Vec<Product> {
    creators
        .iter()
        .zip(1..)
        .map(|(creator, id)| Product {
            id,
            name: "Demo".to_string(),
            price: "999".to_string(),
            created_at: if with_created_at { day(2025, 2, 5) } else { None },
            created_by: creator.to_string(),
            updated_at: day(2025, 2, 5),
            updated_by: "Admin".to_string(),
            is_active: true,
        })
        .collect()
}

/// `None` when the dataset holds a different record type.
pub fn products(dataset: SeedDataset) -> Option<Vec<Product>> {
    match dataset {
        SeedDataset::Products => Some(demo_products(
            &["Admin", "Admin", "Admin", "User", "User", "User"],
            true,
        )),
        SeedDataset::Dummy => Some(demo_products(
            &["Admin", "User", "User", "Admin", "Admin", "User"],
            false,
        )),
        SeedDataset::Common => Some(demo_products(
            &["Admin", "Admin", "User", "User", "User", "User"],
            false,
        )),
        SeedDataset::Leads => None,
    }
}

pub fn leads(dataset: SeedDataset) -> Option<Vec<Lead>> {
    if dataset != SeedDataset::Leads {
        return None;
    }
    let rows: [(&str, &str, &str, &str, &str, bool); 12] = [
        ("Ada Lovelace", "Analytical Ltd", "New", "Website", "Maya", true),
        ("Grace Hopper", "Cobol Corp", "Contacted", "Referral", "Liam", true),
        ("Alan Turing", "Enigma Works", "Qualified", "Conference", "Maya", true),
        ("Edsger Dijkstra", "Shortest Path BV", "Lost", "Cold Call", "Noah", false),
        ("Barbara Liskov", "Substitution Inc", "Converted", "Website", "Liam", true),
        ("Ken Thompson", "Bell Labs", "New", "Referral", "Noah", true),
        ("Margaret Hamilton", "Apollo Systems", "Contacted", "LinkedIn", "Maya", true),
        ("Donald Knuth", "TeX Press", "Qualified", "Website", "Liam", true),
        ("Frances Allen", "Optimizing Co", "New", "Conference", "Noah", true),
        ("John McCarthy", "Lisp Machines", "Lost", "Cold Call", "Maya", false),
        ("Radia Perlman", "Spanning Tree", "Converted", "Referral", "Liam", true),
        ("Leslie Lamport", "Paxos Partners", "Contacted", "Website", "Noah", true),
    ];
    let leads = rows
        .iter()
        .zip(1..)
        .map(|(&(name, company, status, source, owner, active), id)| {
            let handle = name.split_whitespace().next().unwrap_or(name).to_lowercase();
            Lead {
                id,
                lead_name: name.to_string(),
                company_name: company.to_string(),
                email: format!("{}@example.com", handle),
                phone: format!("+1 555 01{:02}", id),
                status: status.to_string(),
                source: source.to_string(),
                assigned_to: owner.to_string(),
                is_active: active,
                created_at: day(2025, 3, id as u32),
                updated_at: day(2025, 4, id as u32),
            }
        })
        .collect();
    Some(leads)
}
