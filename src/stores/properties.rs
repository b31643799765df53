use crate::models::{ListingStatus, Property};
use crate::stores::StoreError;

/// Property listings and the current selection
#[derive(Clone, Debug, Default)]
pub struct PropertiesStore {
    pub properties: Vec<Property>,
    pub selected: Option<String>,
    pub loading: bool,
}

impl PropertiesStore {
    pub fn new(properties: Vec<Property>) -> Self {
        PropertiesStore {
            properties,
            selected: None,
            loading: false,
        }
    }

    pub fn set_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
        if let Some(id) = &self.selected {
            if self.get(id).is_none() {
                self.selected = None;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn select(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::UnknownProperty(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_property(&self) -> Option<&Property> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Take `tokens` off the market after a confirmed purchase
    pub fn reserve_tokens(&mut self, id: &str, tokens: u32) -> Result<&Property, StoreError> {
        let property = self
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownProperty(id.to_string()))?;
        if tokens > property.available_tokens {
            return Err(StoreError::InsufficientTokens {
                requested: tokens,
                available: property.available_tokens,
            });
        }
        property.available_tokens -= tokens;
        if property.available_tokens == 0 {
            property.status = ListingStatus::SoldOut;
        }
        Ok(&*property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn test_select_unknown_property_fails() {
        let mut store = PropertiesStore::new(data::properties());
        assert_eq!(store.select("404"), Err(StoreError::UnknownProperty("404".into())));
        store.select("2").unwrap();
        assert_eq!(store.selected_property().map(|p| p.name.as_str()), Some("Beachfront Villa"));
        store.clear_selection();
        assert!(store.selected_property().is_none());
    }

    #[test]
    fn test_reserve_tokens() {
        let mut store = PropertiesStore::new(data::properties());
        let left = store.reserve_tokens("3", 50).unwrap().available_tokens;
        assert_eq!(left, 150);

        let err = store.reserve_tokens("3", 151).unwrap_err();
        assert_eq!(err, StoreError::InsufficientTokens { requested: 151, available: 150 });

        let property = store.reserve_tokens("3", 150).unwrap();
        assert_eq!(property.status, ListingStatus::SoldOut);
    }

    #[test]
    fn test_replacing_properties_drops_stale_selection() {
        let mut store = PropertiesStore::new(data::properties());
        store.select("6").unwrap();
        store.set_properties(data::properties().into_iter().take(2).collect());
        assert_eq!(store.selected, None);
    }
}
