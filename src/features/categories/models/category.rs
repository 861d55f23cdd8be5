use sqlx::FromRow;

/// Stored category row (`categorias`)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Values for a category insert; the id is generated by the store
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Full replacement of the editable category fields
#[derive(Debug, Clone)]
pub struct CategoryChanges {
    pub name: String,
    pub description: Option<String>,
}

/// Outcome of a logical delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deactivation {
    Deactivated,
    AlreadyInactive,
}
