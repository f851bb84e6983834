//! Site settings form.

use eframe::egui;

use crate::store::settings::{HeroAnimation, SiteSettings};

pub enum SettingsAction {
    Save(SiteSettings),
}

/// Holds the edit copies of every settings field; populated from the
/// record on construction and builds a fresh record on save.
pub struct SettingsPanel {
    site_name: String,
    hero_title: String,
    hero_subtitle: String,
    hero_animation: HeroAnimation,
    hero_image: String,
}

impl SettingsPanel {
    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self {
            site_name: settings.site_name.clone(),
            hero_title: settings.hero_title.clone(),
            hero_subtitle: settings.hero_subtitle.clone(),
            hero_animation: settings.hero_animation,
            hero_image: settings.hero_image.clone(),
        }
    }

    fn to_settings(&self) -> SiteSettings {
        SiteSettings {
            site_name: self.site_name.clone(),
            hero_title: self.hero_title.clone(),
            hero_subtitle: self.hero_subtitle.clone(),
            hero_animation: self.hero_animation,
            hero_image: self.hero_image.clone(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<SettingsAction> {
        let mut action = None;

        ui.heading("🏪 Website Settings");
        ui.separator();

        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                ui.label("Site name");
                ui.add(egui::TextEdit::singleline(&mut self.site_name).desired_width(340.0));
                ui.end_row();

                ui.label("Hero title");
                ui.add(egui::TextEdit::singleline(&mut self.hero_title).desired_width(340.0));
                ui.end_row();

                ui.label("Hero subtitle");
                ui.add(
                    egui::TextEdit::multiline(&mut self.hero_subtitle)
                        .desired_rows(2)
                        .desired_width(340.0),
                );
                ui.end_row();

                ui.label("Hero animation");
                egui::ComboBox::from_id_salt("hero_animation")
                    .selected_text(self.hero_animation.label())
                    .show_ui(ui, |ui| {
                        for animation in HeroAnimation::all() {
                            ui.selectable_value(
                                &mut self.hero_animation,
                                animation,
                                animation.label(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Hero image URL");
                ui.add(egui::TextEdit::singleline(&mut self.hero_image).desired_width(340.0));
                ui.end_row();
            });

        if !self.hero_image.is_empty() {
            ui.add_space(8.0);
            ui.add(
                egui::Image::new(self.hero_image.as_str())
                    .max_width(400.0)
                    .max_height(130.0),
            );
        }

        ui.add_space(10.0);
        if ui.button("💾 Save Settings").clicked() {
            action = Some(SettingsAction::Save(self.to_settings()));
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip_through_the_form() {
        let mut settings = SiteSettings::default();
        settings.hero_animation = HeroAnimation::ZoomIn;
        settings.site_name = "MIDNIGHT MUSK".to_string();

        let panel = SettingsPanel::from_settings(&settings);
        assert_eq!(panel.to_settings(), settings);
    }
}
