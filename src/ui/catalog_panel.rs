//! Product list table with per-row actions and a delete confirmation.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::store::catalog::Product;
use crate::ui::format_rupees;

pub enum CatalogAction {
    /// Open the edit form for this product.
    Edit(u32),
    /// Confirmed deletion of this product.
    Delete(u32),
}

#[derive(Default)]
pub struct CatalogPanel {
    /// Product awaiting delete confirmation.
    pending_delete: Option<u32>,
}

impl CatalogPanel {
    pub fn show(&mut self, ui: &mut egui::Ui, products: &[Product]) -> Option<CatalogAction> {
        let mut action: Option<CatalogAction> = None;

        if products.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No products yet. Use ➕ Add Product to create one.");
            });
            return None;
        }

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto())
            .column(Column::auto().resizable(true))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("ID");
                });
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Price");
                });
                header.col(|ui| {
                    ui.strong("Stock");
                });
                header.col(|ui| {
                    ui.strong("Badge");
                });
                header.col(|ui| {
                    ui.strong("Rating");
                });
                header.col(|ui| {
                    ui.strong("Actions");
                });
            })
            .body(|mut body| {
                for product in products {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(product.id.to_string());
                        });

                        row.col(|ui| {
                            ui.label(&product.name).on_hover_text(&product.description);
                        });

                        row.col(|ui| {
                            ui.label(format_rupees(product.price));
                            if let Some(original) = product.original_price {
                                ui.label(
                                    egui::RichText::new(format_rupees(original))
                                        .strikethrough()
                                        .weak(),
                                );
                            }
                        });

                        row.col(|ui| {
                            if product.quantity == 0 {
                                ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "0");
                            } else {
                                ui.label(product.quantity.to_string());
                            }
                        });

                        row.col(|ui| {
                            match &product.badge {
                                Some(badge) => ui.label(egui::RichText::new(badge).small().strong()),
                                None => ui.label(egui::RichText::new("—").weak()),
                            };
                        });

                        row.col(|ui| {
                            match product.rating {
                                Some(rating) => {
                                    ui.label(format!("★ {:.1} ({})", rating, product.reviews))
                                }
                                None => ui.label(egui::RichText::new("—").weak()),
                            };
                        });

                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                if ui.button("✏").on_hover_text("Edit").clicked() {
                                    action = Some(CatalogAction::Edit(product.id));
                                }
                                if ui.button("🗑").on_hover_text("Delete").clicked() {
                                    self.pending_delete = Some(product.id);
                                }
                                if ui.button("📋").on_hover_text("Copy image URL").clicked() {
                                    ui.ctx().copy_text(product.image.clone());
                                }
                            });
                        });
                    });
                }
            });

        if let Some(confirmed) = self.confirm_dialog(ui.ctx(), products) {
            action = Some(CatalogAction::Delete(confirmed));
        }

        action
    }

    /// Confirmation window; returns the id once the user confirms.
    fn confirm_dialog(&mut self, ctx: &egui::Context, products: &[Product]) -> Option<u32> {
        let id = self.pending_delete?;
        let name = products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("this product");

        let mut confirmed = None;
        egui::Window::new("Delete product")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this product?");
                ui.label(egui::RichText::new(name).strong());
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("🗑 Delete").clicked() {
                        confirmed = Some(id);
                        self.pending_delete = None;
                    }
                    if ui.button("Cancel").clicked() {
                        self.pending_delete = None;
                    }
                });
            });

        confirmed
    }
}
