//! Product catalog
//!
//! The ordered product collection persisted under [`CATALOG_KEY`] as a
//! bare JSON array, matching the blob the storefront page reads.

use serde::{Deserialize, Serialize};

use super::local::{LocalStore, StoreError, CATALOG_KEY};

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the catalog for the lifetime of the process.
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Whole rupees.
    pub price: u32,
    /// Pre-discount price shown struck through, if any.
    #[serde(default)]
    pub original_price: Option<u32>,
    /// Stock count.
    pub quantity: u32,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: u32,
    /// Short label like "PREMIUM", if any.
    #[serde(default)]
    pub badge: Option<String>,
    pub image: String,
}

/// Everything a product carries except its id. Produced by the add/edit
/// form and applied by [`Catalog::add`] and [`Catalog::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: u32,
    pub original_price: Option<u32>,
    pub quantity: u32,
    pub rating: Option<f32>,
    pub reviews: u32,
    pub badge: Option<String>,
    pub image: String,
}

impl ProductDraft {
    fn into_product(self, id: u32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            quantity: self.quantity,
            rating: self.rating,
            reviews: self.reviews,
            badge: self.badge,
            image: self.image,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            original_price: p.original_price,
            quantity: p.quantity,
            rating: p.rating,
            reviews: p.reviews,
            badge: p.badge.clone(),
            image: p.image.clone(),
        }
    }
}

/// The ordered product collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the stored catalog. A store with no catalog yet yields the
    /// seed products; nothing is persisted until the first save.
    pub fn load(store: &LocalStore) -> Result<Self, StoreError> {
        match store.get_record(CATALOG_KEY)? {
            Some(catalog) => Ok(catalog),
            None => {
                tracing::info!("No stored catalog, seeding example products");
                Ok(Self::seed())
            }
        }
    }

    /// The two example products a fresh install starts with.
    pub fn seed() -> Self {
        Self {
            products: vec![
                Product {
                    id: 1,
                    name: "Henyle Acetate Premium".to_string(),
                    description: "High-grade henyle acetate for premium fragrance formulations"
                        .to_string(),
                    price: 2800,
                    original_price: Some(3500),
                    quantity: 15,
                    rating: Some(4.8),
                    reviews: 124,
                    badge: Some("PREMIUM".to_string()),
                    image:
                        "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=300&q=80"
                            .to_string(),
                },
                Product {
                    id: 2,
                    name: "Benzyl Benzoate Pure".to_string(),
                    description: "Pure benzyl benzoate compound for chemical synthesis".to_string(),
                    price: 2200,
                    original_price: Some(2750),
                    quantity: 8,
                    rating: Some(4.7),
                    reviews: 89,
                    badge: Some("PURE".to_string()),
                    image:
                        "https://images.unsplash.com/photo-1585435557343-3b092031d8eb?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&h=300&q=80"
                            .to_string(),
                },
            ],
        }
    }

    /// Like [`load`](Self::load), but an unreadable blob falls back to
    /// an empty catalog in memory. Returns true in the second position
    /// when the fallback was taken; the stored file is left untouched
    /// until the next explicit save.
    pub fn load_or_default(store: &LocalStore) -> (Self, bool) {
        match Self::load(store) {
            Ok(catalog) => (catalog, false),
            Err(e) => {
                tracing::warn!("Falling back to an empty catalog: {}", e);
                (Self::default(), true)
            }
        }
    }

    /// Persist the whole collection as one blob.
    pub fn save(&self, store: &LocalStore) -> Result<(), StoreError> {
        store.put_record(CATALOG_KEY, self)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Next id to assign: one past the highest live id, 1 for an empty
    /// catalog.
    pub fn next_id(&self) -> u32 {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Append a new product built from `draft`. Returns the assigned id.
    pub fn add(&mut self, draft: ProductDraft) -> u32 {
        let id = self.next_id();
        self.products.push(draft.into_product(id));
        id
    }

    /// Replace every non-id field of the product with `id` from `draft`.
    /// Returns false when no product has that id.
    pub fn update(&mut self, id: u32, draft: ProductDraft) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                *slot = draft.into_product(id);
                true
            }
            None => false,
        }
    }

    /// Remove the product with `id`. Returns false when no product has
    /// that id.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{name} description"),
            price: 500,
            original_price: None,
            quantity: 1,
            rating: None,
            reviews: 0,
            badge: None,
            image: "https://example.com/p.jpg".to_string(),
        }
    }

    #[test]
    fn seed_has_the_two_example_products() {
        let catalog = Catalog::seed();
        let ids: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(catalog.get(1).unwrap().name, "Henyle Acetate Premium");
        assert_eq!(catalog.get(2).unwrap().badge.as_deref(), Some("PURE"));
    }

    #[test]
    fn add_assigns_one_past_the_highest_id() {
        let mut catalog = Catalog::seed();
        assert_eq!(catalog.add(draft("Third")), 3);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn add_to_empty_catalog_starts_at_one() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.add(draft("First")), 1);
    }

    #[test]
    fn next_id_follows_the_highest_live_id() {
        let mut catalog = Catalog::seed();
        catalog.remove(2);
        // ids are unique among live products only
        assert_eq!(catalog.add(draft("Replacement")), 2);
    }

    #[test]
    fn update_replaces_fields_and_keeps_the_id() {
        let mut catalog = Catalog::seed();
        let mut changed = ProductDraft::from(catalog.get(1).unwrap());
        changed.price = 2950;

        assert!(catalog.update(1, changed));

        let updated = catalog.get(1).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.price, 2950);
        assert_eq!(updated.name, "Henyle Acetate Premium");
        assert_eq!(updated.badge.as_deref(), Some("PREMIUM"));
        assert_eq!(updated.reviews, 124);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut catalog = Catalog::seed();
        let before = catalog.clone();
        assert!(!catalog.update(99, draft("Ghost")));
        assert_eq!(catalog, before);
    }

    #[test]
    fn remove_only_touches_the_matching_id() {
        let mut catalog = Catalog::seed();
        assert!(catalog.remove(1));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].id, 2);

        assert!(!catalog.remove(99));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn corrupt_blob_falls_back_to_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.set(CATALOG_KEY, "[{broken").unwrap();

        let (catalog, fell_back) = Catalog::load_or_default(&store);
        assert!(fell_back);
        assert!(catalog.is_empty());
    }

    #[test]
    fn persists_as_a_bare_array_with_camel_case_keys() {
        let json = serde_json::to_value(Catalog::seed()).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert!(array[0].get("originalPrice").is_some());
        assert!(array[0].get("original_price").is_none());
    }

    #[test]
    fn legacy_records_without_optional_fields_load() {
        let json =
            r#"[{"id":7,"name":"Bare","description":"d","price":100,"quantity":1,"image":"u"}]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();

        let p = catalog.get(7).unwrap();
        assert_eq!(p.original_price, None);
        assert_eq!(p.rating, None);
        assert_eq!(p.reviews, 0);
        assert_eq!(p.badge, None);
    }
}
