use serde::Serialize;

use crate::errors::Result;
use crate::rules::validation::{validate_location, validate_name};

/// Raw `departments` row, in column order `(id, name, location)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub location: String,
}

/// Department - an organisational unit employees belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: Option<i64>,
    name: String,
    location: String,
}

impl Department {
    /// Build an unpersisted department
    ///
    /// # Errors
    /// `InvalidName` or `InvalidLocation` for empty strings.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let location = location.into();
        validate_name(&name)?;
        validate_location(&location)?;
        Ok(Self {
            id: None,
            name,
            location,
        })
    }

    /// Build a department from a stored row
    ///
    /// # Errors
    /// `InvalidName` or `InvalidLocation` if the row holds an empty value.
    pub fn hydrate(row: &DepartmentRow) -> Result<Self> {
        let mut department = Self::new(row.name.clone(), row.location.clone())?;
        department.id = Some(row.id);
        Ok(department)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// # Errors
    /// `InvalidName` if the name is empty; the department is left unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// # Errors
    /// `InvalidLocation` if the location is empty; the department is left unchanged.
    pub fn set_location(&mut self, location: impl Into<String>) -> Result<()> {
        let location = location.into();
        validate_location(&location)?;
        self.location = location;
        Ok(())
    }

    /// Overwrite every field from a stored row
    ///
    /// # Errors
    /// `InvalidName` or `InvalidLocation`; nothing is overwritten.
    pub fn refresh_from(&mut self, row: &DepartmentRow) -> Result<()> {
        validate_name(&row.name)?;
        validate_location(&row.location)?;
        self.id = Some(row.id);
        self.name = row.name.clone();
        self.location = row.location.clone();
        Ok(())
    }

    pub fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn mark_detached(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "[{}] ", id)?,
            None => write!(f, "[unsaved] ")?,
        }
        write!(f, "{} ({})", self.name, self.location)
    }
}
