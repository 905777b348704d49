//! Locally cached connector lists, reconciled only with records the
//! listener API returned.

use crate::error::ApiError;
use crate::model::connector::ConnectorConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigCache<T: ConnectorConfig> {
    items: Vec<T>,
}

impl<T: ConnectorConfig> Default for ConfigCache<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: ConnectorConfig> ConfigCache<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Swaps in the returned record for the entry with the same id.
    /// Returns `false` when no entry matched; the cache is then unchanged.
    pub fn replace(&mut self, updated: T) -> bool {
        let Some(id) = updated.id() else {
            return false;
        };
        match self.items.iter_mut().find(|item| item.id() == Some(id)) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == Some(id))?;
        Some(self.items.remove(index))
    }

    /// Reconciles the result of a delete request. A failed delete leaves
    /// every entry in place and hands the error back.
    pub fn apply_delete(
        &mut self,
        id: i64,
        result: Result<(), ApiError>,
    ) -> Result<Option<T>, ApiError> {
        result.map(|()| self.remove(id))
    }

    /// Entries bound to the given client and, when set, interface.
    pub fn scoped(&self, client_id: i64, interface_id: Option<i64>) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.client().map(|c| c.id) == Some(client_id))
            .filter(|item| {
                interface_id.is_none_or(|id| item.interface().map(|i| i.id) == Some(id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::client::EntityRef;
    use crate::model::connector::SftpConfig;

    fn sftp(id: i64, host: &str, active: bool) -> SftpConfig {
        let mut config = SftpConfig {
            id: Some(id),
            host: host.to_string(),
            username: "acme".into(),
            active,
            ..SftpConfig::default()
        };
        config.bind(EntityRef::new(1), EntityRef::new(id * 10));
        config
    }

    fn ids(cache: &ConfigCache<SftpConfig>) -> Vec<Option<i64>> {
        cache.items().iter().map(|c| c.id).collect()
    }

    #[test]
    fn toggle_result_touches_only_its_record() {
        let mut cache = ConfigCache::new(vec![
            sftp(1, "a.example", true),
            sftp(2, "b.example", true),
            sftp(3, "c.example", false),
        ]);
        let before = cache.clone();

        let mut toggled = sftp(2, "b.example", false);
        toggled.polling_interval = 20000;
        assert!(cache.replace(toggled.clone()));

        assert_eq!(cache.items()[1], toggled);
        assert_eq!(cache.items()[0], before.items()[0]);
        assert_eq!(cache.items()[2], before.items()[2]);
        assert_eq!(ids(&cache), vec![Some(1), Some(2), Some(3)]);
        assert!(!cache.items()[1].is_active());
    }

    #[test]
    fn replace_of_unknown_record_is_ignored() {
        let mut cache = ConfigCache::new(vec![sftp(1, "a.example", true)]);
        let before = cache.clone();
        assert!(!cache.replace(sftp(9, "z.example", false)));
        assert!(!cache.replace(SftpConfig::default()));
        assert_eq!(cache, before);
    }

    #[test]
    fn remove_and_scope() {
        let mut cache = ConfigCache::new(vec![sftp(1, "a", true), sftp(2, "b", true)]);
        assert_eq!(cache.scoped(1, None).len(), 2);
        assert_eq!(cache.scoped(1, Some(20)).len(), 1);
        assert!(cache.scoped(7, None).is_empty());

        assert_eq!(cache.remove(1).map(|c| c.host), Some("a".to_string()));
        assert!(cache.remove(1).is_none());
    }

    #[test]
    fn failed_delete_keeps_every_entry() {
        let mut cache = ConfigCache::new(vec![sftp(1, "a", true), sftp(2, "b", false)]);
        let before = cache.clone();

        let conflict = ApiError::Status {
            status: 409,
            message: "Connector is in use".into(),
        };
        let result = cache.apply_delete(2, Err(conflict));
        assert_eq!(result.map_err(|e| e.to_string()), Err("Connector is in use".to_string()));
        assert_eq!(cache, before);
    }

    #[test]
    fn successful_delete_removes_exactly_one() {
        let mut cache =
            ConfigCache::new(vec![sftp(1, "a", true), sftp(2, "b", false), sftp(3, "c", true)]);

        let removed = cache.apply_delete(2, Ok(())).unwrap();
        assert_eq!(removed.map(|c| c.host), Some("b".to_string()));
        assert_eq!(ids(&cache), vec![Some(1), Some(3)]);

        assert_eq!(cache.apply_delete(2, Ok(())), Ok(None));
    }
}
