use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Specimen {
    pub id: Uuid,
    pub owner_id: String,
    pub catalog_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub locality_id: Option<Uuid>,
    /// Ordered; the first entry is the primary mineral
    pub mineral_ids: Vec<Uuid>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Specimen {
    pub fn primary_mineral_id(&self) -> Option<Uuid> {
        self.mineral_ids.first().copied()
    }

    pub fn is_owned_by(&self, account_id: &str) -> bool {
        self.owner_id == account_id
    }

    pub fn is_visible_to(&self, account_id: &str) -> bool {
        self.is_public || self.is_owned_by(account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specimen(owner: &str, is_public: bool, mineral_ids: Vec<Uuid>) -> Specimen {
        let now = Utc::now();
        Specimen {
            id: Uuid::new_v4(),
            owner_id: owner.to_string(),
            catalog_number: None,
            title: "Fluorite on matrix".to_string(),
            description: None,
            locality_id: None,
            mineral_ids,
            is_public,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_primary_mineral_is_first() {
        let fluorite = Uuid::new_v4();
        let galena = Uuid::new_v4();
        assert_eq!(
            specimen("a", false, vec![fluorite, galena]).primary_mineral_id(),
            Some(fluorite)
        );
        assert_eq!(specimen("a", false, vec![]).primary_mineral_id(), None);
    }

    #[test]
    fn test_visibility() {
        let private = specimen("alice", false, vec![]);
        assert!(private.is_visible_to("alice"));
        assert!(!private.is_visible_to("bob"));

        let public = specimen("alice", true, vec![]);
        assert!(public.is_visible_to("bob"));
        assert!(!public.is_owned_by("bob"));
    }
}
