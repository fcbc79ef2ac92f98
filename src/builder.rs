use tracing::{instrument, warn};

use crate::arena::FamilyTree;
use crate::date::DateValidator;
use crate::errors::{StoreError, StoreResult};

/// One roster entry for bulk seeding. `id: None` requests auto-assignment.
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub id: Option<u32>,
    pub name: String,
    pub birth_date: String,
    pub father_id: Option<u32>,
    pub mother_id: Option<u32>,
}

impl PersonRecord {
    pub fn new(id: Option<u32>, name: &str, birth_date: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            father_id: None,
            mother_id: None,
        }
    }

    pub fn with_parents(mut self, father_id: Option<u32>, mother_id: Option<u32>) -> Self {
        self.father_id = father_id;
        self.mother_id = mother_id;
        self
    }
}

/// Builds a [`FamilyTree`] from a roster of records.
///
/// Records are processed in order, so a referenced parent must appear
/// before its children (pedigree ordering). Birth dates are validated up
/// front; duplicate ids are skipped with a warning, matching the store's
/// permissive insert semantics.
pub struct RosterBuilder {
    validator: DateValidator,
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self {
            validator: DateValidator::new(),
        }
    }

    #[instrument(level = "debug", skip(self, records))]
    pub fn build(&self, records: &[PersonRecord]) -> StoreResult<FamilyTree> {
        let mut tree = FamilyTree::new();

        for record in records {
            self.validator.validate(&record.birth_date)?;

            let id = record.id.unwrap_or_else(|| tree.next_id());
            let father = self.resolve_parent(&tree, id, record.father_id)?;
            let mother = self.resolve_parent(&tree, id, record.mother_id)?;

            if tree.insert(id, &record.name, &record.birth_date, father, mother).is_none() {
                warn!(id, "duplicate id in roster, record skipped");
            }
        }

        Ok(tree)
    }

    fn resolve_parent(
        &self,
        tree: &FamilyTree,
        child: u32,
        parent_id: Option<u32>,
    ) -> StoreResult<Option<generational_arena::Index>> {
        match parent_id {
            None => Ok(None),
            Some(parent) => tree
                .lookup(parent)
                .map(Some)
                .ok_or(StoreError::UnknownParent { child, parent }),
        }
    }
}
