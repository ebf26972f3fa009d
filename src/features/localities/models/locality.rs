use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a geographic place
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Locality {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `None` marks a root (typically a country)
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for an insert; id and timestamps come from the store
#[derive(Debug, Clone)]
pub struct NewLocality {
    pub name: String,
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub parent_id: Option<Uuid>,
}

/// A locality together with its resolved ancestor chain
#[derive(Debug, Clone)]
pub struct LocalityWithAncestors {
    pub locality: Locality,
    /// Immediate parent first, root last
    pub ancestors: Vec<Locality>,
    /// Leaf-first, comma-joined names, e.g. "Ouro Preto Mine, Minas Gerais, Brazil"
    pub full_path: String,
}
