//! Site settings record
//!
//! The singleton settings blob persisted under [`SETTINGS_KEY`]. Field
//! names serialize in camelCase so the stored blob stays readable by the
//! storefront page.

use serde::{Deserialize, Serialize};

use super::local::{LocalStore, StoreError, SETTINGS_KEY};

/// Hero banner entrance animation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum HeroAnimation {
    #[default]
    FadeIn,
    SlideUp,
    ZoomIn,
    None,
}

impl HeroAnimation {
    pub fn all() -> Vec<Self> {
        vec![Self::FadeIn, Self::SlideUp, Self::ZoomIn, Self::None]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FadeIn => "Fade in",
            Self::SlideUp => "Slide up",
            Self::ZoomIn => "Zoom in",
            Self::None => "None",
        }
    }
}

/// Site-wide display settings. Saved in full on every save; there is no
/// partial update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_animation: HeroAnimation,
    pub hero_image: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "THE CENTURY SCENTS".to_string(),
            hero_title: "DISCOVER THE ESSENCE OF LUXURY".to_string(),
            hero_subtitle:
                "Experience our exclusive collection of premium chemical solutions and fragrances"
                    .to_string(),
            hero_animation: HeroAnimation::FadeIn,
            hero_image:
                "https://images.unsplash.com/photo-1596462502278-27bfdc403348?ixlib=rb-4.0.3&auto=format&fit=crop&w=2004&q=80"
                    .to_string(),
        }
    }
}

impl SiteSettings {
    /// Load the stored settings. A store with no settings yet yields the
    /// defaults; an unreadable blob is an error so the caller can surface
    /// it without overwriting the file.
    pub fn load(store: &LocalStore) -> Result<Self, StoreError> {
        match store.get_record(SETTINGS_KEY)? {
            Some(settings) => Ok(settings),
            None => {
                tracing::info!("No stored settings, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Like [`load`](Self::load), but an unreadable blob falls back to
    /// the defaults in memory. Returns true in the second position when
    /// the fallback was taken; the stored file is left untouched until
    /// the next explicit save.
    pub fn load_or_default(store: &LocalStore) -> (Self, bool) {
        match Self::load(store) {
            Ok(settings) => (settings, false),
            Err(e) => {
                tracing::warn!("Falling back to default settings: {}", e);
                (Self::default(), true)
            }
        }
    }

    pub fn save(&self, store: &LocalStore) -> Result<(), StoreError> {
        store.put_record(SETTINGS_KEY, self)
    }
}
