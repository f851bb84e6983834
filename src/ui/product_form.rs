//! Add/edit product modal.
//!
//! Field values live here as edit strings until submit parses them into
//! a [`ProductDraft`]. `editing_id` is `None` while adding a new product.

use eframe::egui;

use crate::store::catalog::{Product, ProductDraft};

/// Produced when the user submits valid input. `editing` carries the id
/// being edited, `None` for a new product.
pub enum ProductFormAction {
    Submit {
        editing: Option<u32>,
        draft: ProductDraft,
    },
}

#[derive(Default)]
pub struct ProductForm {
    open: bool,
    editing_id: Option<u32>,
    name: String,
    description: String,
    price: String,
    original_price: String,
    quantity: String,
    rating: String,
    reviews: String,
    badge: String,
    image: String,
    errors: Vec<String>,
}

impl ProductForm {
    /// Open the form empty, for a new product.
    pub fn open_add(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    /// Open the form populated from an existing product. Absent optional
    /// fields populate as empty strings.
    pub fn open_edit(&mut self, product: &Product) {
        *self = Self::default();
        self.editing_id = Some(product.id);
        self.name = product.name.clone();
        self.description = product.description.clone();
        self.price = product.price.to_string();
        self.original_price = product
            .original_price
            .map(|p| p.to_string())
            .unwrap_or_default();
        self.quantity = product.quantity.to_string();
        self.rating = product.rating.map(|r| r.to_string()).unwrap_or_default();
        self.reviews = product.reviews.to_string();
        self.badge = product.badge.clone().unwrap_or_default();
        self.image = product.image.clone();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing_id = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing_id(&self) -> Option<u32> {
        self.editing_id
    }

    /// Parse the edit strings into a draft.
    ///
    /// Required fields reject the submission with a message; optional
    /// numerics fall back to `None` (0 for reviews) when they do not
    /// parse.
    fn parse(&self) -> Result<ProductDraft, Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        }
        if self.image.trim().is_empty() {
            errors.push("Image URL is required".to_string());
        }

        let price = parse_required_u32(&self.price, "Price", &mut errors);
        let quantity = parse_required_u32(&self.quantity, "Quantity", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: price.unwrap_or(0),
            original_price: parse_optional_u32(&self.original_price),
            quantity: quantity.unwrap_or(0),
            // "NaN" parses as a float; treat it as absent
            rating: self
                .rating
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|r| r.is_finite()),
            reviews: self.reviews.trim().parse::<u32>().unwrap_or(0),
            badge: if self.badge.is_empty() {
                None
            } else {
                Some(self.badge.clone())
            },
            image: self.image.clone(),
        })
    }

    /// Modal window. Returns the submit action once the input parses;
    /// otherwise the window stays open showing the validation messages.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<ProductFormAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let editing = self.editing_id.is_some();
        let title = if editing { "Edit Product" } else { "Add Product" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("product_form_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.add(egui::TextEdit::singleline(&mut self.name).desired_width(280.0));
                        ui.end_row();

                        ui.label("Description");
                        ui.add(
                            egui::TextEdit::multiline(&mut self.description)
                                .desired_rows(2)
                                .desired_width(280.0),
                        );
                        ui.end_row();

                        ui.label("Price (Rs)");
                        ui.add(egui::TextEdit::singleline(&mut self.price).desired_width(120.0));
                        ui.end_row();

                        ui.label("Original price");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.original_price)
                                .hint_text("optional")
                                .desired_width(120.0),
                        );
                        ui.end_row();

                        ui.label("Quantity");
                        ui.add(egui::TextEdit::singleline(&mut self.quantity).desired_width(120.0));
                        ui.end_row();

                        ui.label("Rating");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.rating)
                                .hint_text("optional, e.g. 4.5")
                                .desired_width(120.0),
                        );
                        ui.end_row();

                        ui.label("Reviews");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.reviews)
                                .hint_text("0")
                                .desired_width(120.0),
                        );
                        ui.end_row();

                        ui.label("Badge");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.badge)
                                .hint_text("optional, e.g. PREMIUM")
                                .desired_width(120.0),
                        );
                        ui.end_row();

                        ui.label("Image URL");
                        ui.add(egui::TextEdit::singleline(&mut self.image).desired_width(280.0));
                        ui.end_row();
                    });

                if !self.errors.is_empty() {
                    ui.add_space(5.0);
                    for error in &self.errors {
                        ui.colored_label(
                            egui::Color32::from_rgb(255, 100, 100),
                            format!("⚠ {}", error),
                        );
                    }
                }

                ui.add_space(10.0);
                ui.separator();

                ui.horizontal(|ui| {
                    let submit_label = if editing { "Update Product" } else { "Add Product" };
                    if ui.button(submit_label).clicked() {
                        match self.parse() {
                            Ok(draft) => {
                                action = Some(ProductFormAction::Submit {
                                    editing: self.editing_id,
                                    draft,
                                });
                            }
                            Err(errors) => self.errors = errors,
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.close();
                    }
                });
            });

        if action.is_some() {
            self.close();
        }
        action
    }
}

fn parse_required_u32(value: &str, field: &str, errors: &mut Vec<String>) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(format!("{field} is required"));
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(format!("{field} must be a whole number"));
            None
        }
    }
}

fn parse_optional_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
