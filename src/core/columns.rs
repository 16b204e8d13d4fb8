use chrono::Utc;
use serde::{
    Deserialize,
    Serialize,
};

use super::models::Application;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreColumn {
    Company,
    Role,
    Status,
    AppliedAt,
    Notes,
}

impl CoreColumn {
    pub const ALL: [CoreColumn; 5] = [
        CoreColumn::Company,
        CoreColumn::Role,
        CoreColumn::Status,
        CoreColumn::AppliedAt,
        CoreColumn::Notes,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CoreColumn::Company => "company",
            CoreColumn::Role => "role",
            CoreColumn::Status => "status",
            CoreColumn::AppliedAt => "applied_at",
            CoreColumn::Notes => "notes",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            CoreColumn::Company => "Company",
            CoreColumn::Role => "Position",
            CoreColumn::Status => "Status",
            CoreColumn::AppliedAt => "Date Applied",
            CoreColumn::Notes => "Notes",
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            CoreColumn::Company | CoreColumn::Role | CoreColumn::Notes => 200.0,
            CoreColumn::Status => 150.0,
            CoreColumn::AppliedAt => 140.0,
        }
    }
}

/// How a cell is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Enum,
    Date,
    LongText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDescriptor {
    Fixed(CoreColumn),
    Custom(ColumnDefinition),
}

impl ColumnDescriptor {
    pub fn id(&self) -> &str {
        match self {
            ColumnDescriptor::Fixed(column) => column.key(),
            ColumnDescriptor::Custom(definition) => &definition.id,
        }
    }

    pub fn header(&self) -> &str {
        match self {
            ColumnDescriptor::Fixed(column) => column.header(),
            ColumnDescriptor::Custom(definition) => &definition.name,
        }
    }

    pub fn cell_kind(&self) -> CellKind {
        match self {
            ColumnDescriptor::Fixed(CoreColumn::Status) => CellKind::Enum,
            ColumnDescriptor::Fixed(CoreColumn::AppliedAt) => CellKind::Date,
            ColumnDescriptor::Fixed(CoreColumn::Notes) => CellKind::LongText,
            ColumnDescriptor::Fixed(_) | ColumnDescriptor::Custom(_) => CellKind::Text,
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            ColumnDescriptor::Fixed(column) => column.width(),
            ColumnDescriptor::Custom(_) => 160.0,
        }
    }

    pub fn display_value(&self, application: &Application) -> String {
        match self {
            ColumnDescriptor::Fixed(CoreColumn::Company) => application.company.clone(),
            ColumnDescriptor::Fixed(CoreColumn::Role) => application.role.clone(),
            ColumnDescriptor::Fixed(CoreColumn::Status) => application.status.to_string(),
            ColumnDescriptor::Fixed(CoreColumn::AppliedAt) => application.applied_at_text(),
            ColumnDescriptor::Fixed(CoreColumn::Notes) => application.notes.clone(),
            ColumnDescriptor::Custom(definition) => {
                application.custom_value(&definition.id).to_string()
            }
        }
    }
}

/// User-defined columns. The five core columns are always rendered first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRegistry {
    custom: Vec<ColumnDefinition>,
    last_id: i64,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(custom: Vec<ColumnDefinition>) -> Self {
        let last_id = custom.iter().filter_map(|c| c.id.parse::<i64>().ok()).max().unwrap_or(0);
        Self { custom, last_id }
    }

    pub fn custom_columns(&self) -> &[ColumnDefinition] {
        &self.custom
    }

    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        CoreColumn::ALL
            .into_iter()
            .map(ColumnDescriptor::Fixed)
            .chain(self.custom.iter().cloned().map(ColumnDescriptor::Custom))
            .collect()
    }

    /// Blank names are ignored.
    pub fn add_column(&mut self, name: &str) -> Option<&ColumnDefinition> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = self.next_id();
        self.custom.push(ColumnDefinition { id, name: name.to_string() });
        self.custom.last()
    }

    pub fn rename_column(&mut self, id: &str, name: &str) -> bool {
        match self.custom.iter_mut().find(|c| c.id == id) {
            Some(column) => {
                column.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Values stored under the column id in existing rows are left untouched.
    pub fn delete_column(&mut self, id: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|c| c.id != id);
        self.custom.len() != before
    }

    /// Moves `dragged_id` to the position currently held by `target_id`.
    pub fn reorder_column(&mut self, dragged_id: &str, target_id: &str) -> bool {
        let dragged_index = self.custom.iter().position(|c| c.id == dragged_id);
        let target_index = self.custom.iter().position(|c| c.id == target_id);

        let (Some(dragged_index), Some(target_index)) = (dragged_index, target_index) else {
            return false;
        };

        let removed = self.custom.remove(dragged_index);
        self.custom.insert(target_index, removed);
        true
    }

    // Millisecond timestamps, bumped when two columns land in the same millisecond.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> (ColumnRegistry, Vec<String>) {
        let mut registry = ColumnRegistry::new();
        let ids = names
            .iter()
            .map(|name| registry.add_column(name).map(|c| c.id.clone()).unwrap())
            .collect();
        (registry, ids)
    }

    fn names(registry: &ColumnRegistry) -> Vec<&str> {
        registry.custom_columns().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_add_column_trims_and_ignores_blank() {
        let mut registry = ColumnRegistry::new();
        assert!(registry.add_column("   ").is_none());
        assert!(registry.add_column("").is_none());

        let column = registry.add_column("  Salary  ").cloned().unwrap();
        assert_eq!(column.name, "Salary");
        assert!(column.id.parse::<i64>().is_ok());
        assert_eq!(registry.custom_columns().len(), 1);
    }

    #[test]
    fn test_ids_are_unique_within_a_burst() {
        let (_, ids) = registry_with(&["A", "B", "C", "D"]);
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_reorder_is_a_move_not_a_swap() {
        let (mut registry, ids) = registry_with(&["A", "B", "C"]);

        assert!(registry.reorder_column(&ids[0], &ids[2]));
        assert_eq!(names(&registry), vec!["B", "C", "A"]);

        // And back towards the front
        assert!(registry.reorder_column(&ids[0], &ids[1]));
        assert_eq!(names(&registry), vec!["A", "B", "C"]);

        assert!(!registry.reorder_column("missing", &ids[1]));
        assert_eq!(names(&registry), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rename_and_delete() {
        let (mut registry, ids) = registry_with(&["Link", "Salary"]);

        assert!(registry.rename_column(&ids[0], "URL"));
        assert!(!registry.rename_column("missing", "x"));
        assert_eq!(names(&registry), vec!["URL", "Salary"]);

        assert!(registry.delete_column(&ids[0]));
        assert!(!registry.delete_column(&ids[0]));
        assert_eq!(names(&registry), vec!["Salary"]);
    }

    #[test]
    fn test_columns_merge_fixed_then_custom() {
        let (registry, ids) = registry_with(&["Recruiter"]);
        let columns = registry.columns();

        assert_eq!(columns.len(), 6);
        let fixed: Vec<&str> = columns.iter().take(5).map(|c| c.id()).collect();
        assert_eq!(fixed, vec!["company", "role", "status", "applied_at", "notes"]);
        assert_eq!(columns[5].id(), ids[0]);
        assert_eq!(columns[5].header(), "Recruiter");

        assert_eq!(columns[2].cell_kind(), CellKind::Enum);
        assert_eq!(columns[3].cell_kind(), CellKind::Date);
        assert_eq!(columns[4].cell_kind(), CellKind::LongText);
        assert_eq!(columns[5].cell_kind(), CellKind::Text);
    }

    #[test]
    fn test_restored_registry_keeps_ids_monotonic() {
        let definitions = vec![ColumnDefinition {
            id: "99999999999999".to_string(),
            name: "Future".to_string(),
        }];
        let mut registry = ColumnRegistry::from_definitions(definitions);
        let id = registry.add_column("Next").map(|c| c.id.clone()).unwrap();
        assert_eq!(id, "100000000000000");
    }
}
