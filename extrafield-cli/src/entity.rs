//! Custom-data tables and their entity type ids

use anyhow::{Result, bail};
use std::fmt;

/// Entity whose custom fields live in a `*_custom_data` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Candidate,
    Contact,
    Company,
    Job,
    Deal,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Candidate,
        EntityKind::Contact,
        EntityKind::Company,
        EntityKind::Job,
        EntityKind::Deal,
    ];

    /// Resolve a custom-data table name
    pub fn from_table_name(table: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table_name() == table)
    }

    /// Resolve a spreadsheet entity label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Like [`EntityKind::from_table_name`], failing on unknown tables
    pub fn for_table(table: &str) -> Result<Self> {
        match Self::from_table_name(table) {
            Some(kind) => Ok(kind),
            None => bail!("Table name '{}' is not recognized, cannot proceed", table),
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Candidate => "candidate_custom_data",
            EntityKind::Contact => "contact_custom_data",
            EntityKind::Company => "company_custom_data",
            EntityKind::Job => "job_custom_data",
            EntityKind::Deal => "deal_custom_data",
        }
    }

    /// Value used in `tblextrafield(s).entitytypeid`
    pub fn entity_type_id(self) -> i32 {
        match self {
            EntityKind::Candidate => 5,
            EntityKind::Contact => 2,
            EntityKind::Company => 3,
            EntityKind::Job => 4,
            EntityKind::Deal => 13,
        }
    }

    /// Label used in the spreadsheet's `entity` column
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Candidate => "Candidate",
            EntityKind::Contact => "Contact",
            EntityKind::Company => "Company",
            EntityKind::Job => "Job",
            EntityKind::Deal => "Deal",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_ids() {
        assert_eq!(EntityKind::for_table("candidate_custom_data").unwrap().entity_type_id(), 5);
        assert_eq!(EntityKind::for_table("contact_custom_data").unwrap().entity_type_id(), 2);
        assert_eq!(EntityKind::for_table("company_custom_data").unwrap().entity_type_id(), 3);
        assert_eq!(EntityKind::for_table("job_custom_data").unwrap().entity_type_id(), 4);
        assert_eq!(EntityKind::for_table("deal_custom_data").unwrap().entity_type_id(), 13);
    }

    #[test]
    fn test_unknown_table_fails() {
        let err = EntityKind::for_table("lead_custom_data").unwrap_err();
        assert!(err.to_string().contains("lead_custom_data"));
    }

    #[test]
    fn test_from_label() {
        assert_eq!(EntityKind::from_label("Candidate"), Some(EntityKind::Candidate));
        assert_eq!(EntityKind::from_label(" deal "), Some(EntityKind::Deal));
        assert_eq!(EntityKind::from_label("Lead"), None);
    }
}
