//! Application shell.
//!
//! `AdminApp` owns all state: the store, the working copies of the
//! settings and catalog, and every panel. Persistence requests are
//! queued to a single save worker on the tokio runtime, which applies
//! them in order; results come back over the backend channel and are
//! drained once per frame.

use eframe::egui;
use std::sync::mpsc;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::export::ExportEngine;
use crate::store::catalog::{Catalog, ProductDraft};
use crate::store::local::{LocalStore, CATALOG_KEY, SETTINGS_KEY};
use crate::store::settings::SiteSettings;
use crate::ui::catalog_panel::{CatalogAction, CatalogPanel};
use crate::ui::notifications::{NotificationCenter, Severity};
use crate::ui::product_form::{ProductForm, ProductFormAction};
use crate::ui::settings_panel::{SettingsAction, SettingsPanel};
use crate::ui::storefront::StorefrontPreview;

/// Which main tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AdminTab {
    #[default]
    Products,
    Settings,
}

/// Results reported back from the save worker.
#[derive(Debug)]
pub enum BackendMessage {
    /// A save finished; `toast` is the success message to show.
    SaveCompleted { key: &'static str, toast: String },

    /// A save failed with this error.
    SaveFailed { key: &'static str, error: String },
}

/// A queued persistence request carrying the snapshot to write.
#[derive(Debug)]
pub enum SaveRequest {
    Settings { settings: SiteSettings, toast: String },
    Catalog { catalog: Catalog, toast: String },
}

/// Applies save requests one at a time, in the order they were queued,
/// so a newer snapshot can never be overwritten by an older one. Runs
/// until the request channel closes.
pub async fn run_save_worker(
    store: Arc<LocalStore>,
    mut requests: tokio::sync::mpsc::UnboundedReceiver<SaveRequest>,
    results: mpsc::Sender<BackendMessage>,
) {
    while let Some(request) = requests.recv().await {
        let (key, toast, outcome) = match request {
            SaveRequest::Settings { settings, toast } => {
                (SETTINGS_KEY, toast, settings.save(&store))
            }
            SaveRequest::Catalog { catalog, toast } => (CATALOG_KEY, toast, catalog.save(&store)),
        };
        let msg = match outcome {
            Ok(()) => BackendMessage::SaveCompleted { key, toast },
            Err(e) => BackendMessage::SaveFailed {
                key,
                error: e.to_string(),
            },
        };
        if results.send(msg).is_err() {
            break;
        }
    }
}

pub struct AdminApp {
    backend_rx: mpsc::Receiver<BackendMessage>,

    /// Queue feeding the save worker; requests apply in order.
    save_tx: tokio::sync::mpsc::UnboundedSender<SaveRequest>,

    store: Arc<LocalStore>,

    /// Working copy of the catalog; the table renders from this.
    catalog: Catalog,

    /// Working copy of the settings record.
    settings: SiteSettings,

    active_tab: AdminTab,

    settings_panel: SettingsPanel,

    catalog_panel: CatalogPanel,

    product_form: ProductForm,

    storefront: StorefrontPreview,

    show_storefront: bool,

    notifications: NotificationCenter,

    show_notifications: bool,

    show_about: bool,

    /// Persistence tasks still in flight.
    pending_saves: usize,

    status_message: String,
}

impl AdminApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, runtime: Handle, store: LocalStore) -> Self {
        let (backend_tx, backend_rx) = std::sync::mpsc::channel::<BackendMessage>();
        let (save_tx, save_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut notifications = NotificationCenter::default();

        let (settings, settings_fell_back) = SiteSettings::load_or_default(&store);
        if settings_fell_back {
            notifications.push(
                "Stored settings could not be read, showing defaults",
                Severity::Warning,
            );
        }

        let (catalog, catalog_fell_back) = Catalog::load_or_default(&store);
        if catalog_fell_back {
            notifications.push("Stored catalog could not be read", Severity::Warning);
        }

        let storefront = StorefrontPreview::new(&store);
        let settings_panel = SettingsPanel::from_settings(&settings);
        let status_message = format!("Loaded {} products", catalog.len());

        let store = Arc::new(store);
        runtime.spawn(run_save_worker(store.clone(), save_rx, backend_tx));

        Self {
            backend_rx,
            save_tx,
            store,
            catalog,
            settings,
            active_tab: AdminTab::default(),
            settings_panel,
            catalog_panel: CatalogPanel::default(),
            product_form: ProductForm::default(),
            storefront,
            show_storefront: false,
            notifications,
            show_notifications: false,
            show_about: false,
            pending_saves: 0,
            status_message,
        }
    }

    /// Process results from the save worker
    fn process_backend_messages(&mut self) {
        while let Ok(msg) = self.backend_rx.try_recv() {
            match msg {
                BackendMessage::SaveCompleted { key, toast } => {
                    self.pending_saves = self.pending_saves.saturating_sub(1);
                    self.status_message = format!("Saved '{}'", key);
                    self.notifications.push(toast, Severity::Success);
                }
                BackendMessage::SaveFailed { key, error } => {
                    self.pending_saves = self.pending_saves.saturating_sub(1);
                    self.status_message = format!("Saving '{}' failed", key);
                    tracing::error!("Saving '{}' failed: {}", key, error);
                    self.notifications
                        .push(format!("Could not save changes: {}", error), Severity::Error);
                }
            }
        }
    }

    /// Queue the settings working copy for persistence off the UI thread.
    fn persist_settings(&mut self) {
        self.pending_saves += 1;
        let _ = self.save_tx.send(SaveRequest::Settings {
            settings: self.settings.clone(),
            toast: "Website settings saved successfully!".to_string(),
        });
    }

    /// Queue the catalog working copy for persistence off the UI thread.
    fn persist_catalog(&mut self, toast: &str) {
        self.pending_saves += 1;
        let _ = self.save_tx.send(SaveRequest::Catalog {
            catalog: self.catalog.clone(),
            toast: toast.to_string(),
        });
    }

    fn handle_form_submit(&mut self, editing: Option<u32>, draft: ProductDraft) {
        match editing {
            Some(id) => {
                // An id that no longer exists is silently ignored.
                if self.catalog.update(id, draft) {
                    tracing::info!("Updated product {}", id);
                    self.persist_catalog("Product updated successfully!");
                }
            }
            None => {
                let id = self.catalog.add(draft);
                tracing::info!("Added product {}", id);
                self.persist_catalog("Product added successfully!");
            }
        }
    }

    fn handle_delete(&mut self, id: u32) {
        if self.catalog.remove(id) {
            tracing::info!("Deleted product {}", id);
            self.persist_catalog("Product deleted successfully!");
        }
    }

    fn export_catalog_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(ExportEngine::default_file_name("csv"))
            .add_filter("CSV", &["csv"])
            .save_file()
        {
            match ExportEngine::export_catalog_to_csv(self.catalog.products(), &path) {
                Ok(()) => self.notifications.push(
                    format!("Catalog exported to {}", path.display()),
                    Severity::Success,
                ),
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    self.notifications
                        .push(format!("Export failed: {}", e), Severity::Error);
                }
            }
        }
    }

    fn export_catalog_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(ExportEngine::default_file_name("json"))
            .add_filter("JSON", &["json"])
            .save_file()
        {
            match ExportEngine::export_catalog_to_json(self.catalog.products(), &path) {
                Ok(()) => self.notifications.push(
                    format!("Catalog exported to {}", path.display()),
                    Severity::Success,
                ),
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    self.notifications
                        .push(format!("Export failed: {}", e), Severity::Error);
                }
            }
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_backend_messages();
        self.storefront.poll();

        // Keep repainting while toasts fade and saves land.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));

        ctx.set_visuals(egui::Visuals::dark());

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export Catalog (CSV)…").clicked() {
                        self.export_catalog_csv();
                        ui.close_menu();
                    }
                    if ui.button("Export Catalog (JSON)…").clicked() {
                        self.export_catalog_json();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_storefront, "Storefront Preview");
                    ui.checkbox(&mut self.show_notifications, "Notifications");
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about = true;
                    }
                });
            });
        });

        if self.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Storefront Admin");
                        ui.label(
                            egui::RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                                .strong(),
                        );
                        ui.add_space(10.0);
                        ui.separator();
                        ui.add_space(10.0);
                        ui.label("Catalog and site settings manager");
                        ui.label("for the Century Scents storefront");
                        ui.add_space(20.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }

        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.pending_saves > 0 {
                        ui.spinner();
                        ui.label("Saving…");
                        ui.separator();
                    }
                    ui.label(format!("{} products", self.catalog.len()));
                    ui.separator();
                    ui.label(&self.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.store.root().display().to_string())
                                .small()
                                .weak(),
                        )
                        .on_hover_text("Data directory");
                    });
                });
            });

        if self.show_storefront {
            egui::SidePanel::right("storefront_preview")
                .resizable(true)
                .default_width(340.0)
                .min_width(280.0)
                .max_width(500.0)
                .show(ctx, |ui| {
                    self.storefront.show(ui);
                });
        }

        if self.show_notifications {
            egui::SidePanel::right("notifications_panel")
                .resizable(true)
                .default_width(300.0)
                .min_width(250.0)
                .max_width(450.0)
                .show(ctx, |ui| {
                    self.notifications.show_panel(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_tab, AdminTab::Products, "📦 Products");
                ui.selectable_value(&mut self.active_tab, AdminTab::Settings, "🏪 Settings");
            });
            ui.separator();

            match self.active_tab {
                AdminTab::Products => {
                    ui.horizontal(|ui| {
                        if ui.button("➕ Add Product").clicked() {
                            self.product_form.open_add();
                        }
                    });
                    ui.add_space(5.0);

                    if let Some(action) = self.catalog_panel.show(ui, self.catalog.products()) {
                        match action {
                            CatalogAction::Edit(id) => {
                                // Editing an id that vanished is silently ignored.
                                if let Some(product) = self.catalog.get(id) {
                                    self.product_form.open_edit(product);
                                }
                            }
                            CatalogAction::Delete(id) => self.handle_delete(id),
                        }
                    }
                }
                AdminTab::Settings => {
                    if let Some(SettingsAction::Save(settings)) = self.settings_panel.show(ui) {
                        self.settings = settings;
                        self.persist_settings();
                    }
                }
            }
        });

        if let Some(ProductFormAction::Submit { editing, draft }) = self.product_form.show(ctx) {
            self.handle_form_submit(editing, draft);
        }

        self.notifications.show_toasts(ctx);
    }
}
