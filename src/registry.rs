use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::table::Table;
use log::info;
use std::collections::HashMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("table {0} already exists")]
    DuplicateTable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Independent tables keyed by id. Tables share nothing, so each can be driven on its own.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: HashMap<String, Table>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, id: impl Into<String>, config: TableConfig) -> Result<&mut Table, RegistryError> {
        let id = id.into();
        if self.tables.contains_key(&id) {
            return Err(RegistryError::DuplicateTable(id));
        }
        let table = Table::new(id.clone(), config)?;
        info!("table {id} created");
        Ok(self.tables.entry(id).or_insert(table))
    }

    /// Insert a table built elsewhere (e.g. a seeded one).
    pub fn insert(&mut self, table: Table) -> Result<&mut Table, RegistryError> {
        let id = table.id().to_string();
        if self.tables.contains_key(&id) {
            return Err(RegistryError::DuplicateTable(id));
        }
        Ok(self.tables.entry(id).or_insert(table))
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Table> {
        let removed = self.tables.remove(id);
        if removed.is_some() {
            info!("table {id} removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
