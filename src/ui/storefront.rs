//! Live storefront preview.
//!
//! Behaves like the separate storefront page: it holds its own copies of
//! the settings and catalog, seeded by reading the store once, then kept
//! current purely from broadcast change events. It never touches the
//! admin panel's working copies.

use eframe::egui;
use tokio::sync::broadcast;

use crate::store::catalog::{Catalog, Product};
use crate::store::local::{LocalStore, StoreChange, CATALOG_KEY, SETTINGS_KEY};
use crate::store::settings::SiteSettings;
use crate::ui::format_rupees;

pub struct StorefrontPreview {
    changes: broadcast::Receiver<StoreChange>,
    settings: SiteSettings,
    products: Vec<Product>,
    last_sync: Option<chrono::DateTime<chrono::Local>>,
}

impl StorefrontPreview {
    pub fn new(store: &LocalStore) -> Self {
        let changes = store.subscribe();
        let settings = SiteSettings::load(store).unwrap_or_default();
        let products = Catalog::load(store)
            .map(|c| c.products().to_vec())
            .unwrap_or_default();

        Self {
            changes,
            settings,
            products,
            last_sync: None,
        }
    }

    /// Drain pending change events, replacing the local copies from the
    /// event payloads.
    pub fn poll(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(change) => self.apply(change),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Storefront preview lagged, skipped {} change events", skipped);
                }
                Err(_) => break,
            }
        }
    }

    fn apply(&mut self, change: StoreChange) {
        match change.key.as_str() {
            SETTINGS_KEY => match serde_json::from_str(&change.new_value) {
                Ok(settings) => {
                    self.settings = settings;
                    self.last_sync = Some(chrono::Local::now());
                }
                Err(e) => tracing::warn!("Ignoring unreadable settings event: {}", e),
            },
            CATALOG_KEY => match serde_json::from_str::<Vec<Product>>(&change.new_value) {
                Ok(products) => {
                    self.products = products;
                    self.last_sync = Some(chrono::Local::now());
                }
                Err(e) => tracing::warn!("Ignoring unreadable catalog event: {}", e),
            },
            other => tracing::debug!("Ignoring change event for key '{}'", other),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(format!("🛍 {}", self.settings.site_name));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match self.last_sync {
                    Some(at) => ui.label(
                        egui::RichText::new(format!("synced {}", at.format("%H:%M:%S")))
                            .small()
                            .weak(),
                    ),
                    None => ui.label(egui::RichText::new("showing stored data").small().weak()),
                };
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                if !self.settings.hero_image.is_empty() {
                    ui.add(
                        egui::Image::new(self.settings.hero_image.as_str())
                            .max_width(380.0)
                            .max_height(140.0),
                    );
                }
                ui.heading(&self.settings.hero_title);
                ui.label(egui::RichText::new(&self.settings.hero_subtitle).weak());
                ui.label(
                    egui::RichText::new(format!(
                        "entrance: {}",
                        self.settings.hero_animation.label()
                    ))
                    .small()
                    .weak(),
                );
            });
            ui.add_space(10.0);
            ui.separator();

            if self.products.is_empty() {
                ui.label("No products on sale.");
                return;
            }

            for product in &self.products {
                product_card(ui, product);
                ui.add_space(6.0);
            }
        });
    }
}

fn product_card(ui: &mut egui::Ui, product: &Product) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            if !product.image.is_empty() {
                ui.add(
                    egui::Image::new(product.image.as_str()).max_size(egui::vec2(64.0, 64.0)),
                );
            }
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(&product.name);
                    if let Some(badge) = &product.badge {
                        ui.label(
                            egui::RichText::new(badge)
                                .small()
                                .color(egui::Color32::from_rgb(255, 200, 50)),
                        );
                    }
                });
                ui.label(egui::RichText::new(&product.description).small().weak());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format_rupees(product.price)).strong());
                    if let Some(original) = product.original_price {
                        ui.label(
                            egui::RichText::new(format_rupees(original))
                                .strikethrough()
                                .weak(),
                        );
                    }
                    if let Some(rating) = product.rating {
                        ui.label(format!("★ {:.1} ({} reviews)", rating, product.reviews));
                    }
                });
                if product.quantity == 0 {
                    ui.label(
                        egui::RichText::new("Out of stock")
                            .small()
                            .color(egui::Color32::from_rgb(255, 100, 100)),
                    );
                }
            });
        });
    });
}
