//! Toast notifications and the notification history panel.

use eframe::egui;
use std::collections::VecDeque;
use std::time::Instant;

/// How many notifications the history keeps.
const MAX_NOTIFICATIONS: usize = 10;

/// How long a toast stays on screen.
const TOAST_DURATION_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        }
    }

    pub fn color(&self) -> egui::Color32 {
        match self {
            Severity::Success => egui::Color32::from_rgb(80, 200, 120),
            Severity::Warning => egui::Color32::from_rgb(255, 200, 50),
            Severity::Error => egui::Color32::from_rgb(255, 80, 80),
        }
    }
}

/// A transient notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub timestamp: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp: Instant::now(),
        }
    }

    /// Check if this notification should still be shown as a toast
    pub fn is_toast_active(&self) -> bool {
        self.timestamp.elapsed().as_secs() < TOAST_DURATION_SECS
    }
}

#[derive(Default)]
pub struct NotificationCenter {
    pub notifications: VecDeque<Notification>,
}

impl NotificationCenter {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications
            .push_front(Notification::new(message, severity));

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Overlay of active toasts in the top-right corner. Each toast fades
    /// out over its last second and is removed independently of the rest.
    pub fn show_toasts(&self, ctx: &egui::Context) {
        let active: Vec<_> = self
            .notifications
            .iter()
            .filter(|n| n.is_toast_active())
            .collect();

        if active.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notification_toasts"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 40.0))
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    for toast in active {
                        let elapsed = toast.timestamp.elapsed().as_secs_f32();
                        let alpha = if elapsed > (TOAST_DURATION_SECS as f32 - 1.0) {
                            1.0 - (elapsed - (TOAST_DURATION_SECS as f32 - 1.0))
                        } else {
                            1.0
                        }
                        .clamp(0.0, 1.0);

                        let frame_color = toast.severity.color().gamma_multiply(alpha);

                        ui.group(|ui| {
                            ui.visuals_mut().widgets.noninteractive.bg_fill =
                                egui::Color32::from_rgba_unmultiplied(40, 40, 40, (220.0 * alpha) as u8);
                            ui.visuals_mut().widgets.noninteractive.bg_stroke =
                                egui::Stroke::new(2.0, frame_color);
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(toast.severity.icon()).size(16.0));
                                ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
                            });
                        });
                        ui.add_space(5.0);
                    }
                });
            });
    }

    /// History side panel with relative timestamps.
    pub fn show_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("🔔 Notifications");

        if ui.button("Clear all").clicked() {
            self.clear();
        }

        ui.separator();

        if self.notifications.is_empty() {
            ui.label("No notifications yet");
            return;
        }

        egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
            for notification in &self.notifications {
                let elapsed = notification.timestamp.elapsed();
                let time_str = if elapsed.as_secs() < 60 {
                    format!("{}s ago", elapsed.as_secs())
                } else {
                    format!("{}m ago", elapsed.as_secs() / 60)
                };

                ui.group(|ui| {
                    ui.visuals_mut().widgets.noninteractive.bg_fill =
                        egui::Color32::from_rgb(35, 35, 35);
                    ui.visuals_mut().widgets.noninteractive.bg_stroke =
                        egui::Stroke::new(1.0, notification.severity.color());
                    ui.horizontal(|ui| {
                        ui.label(notification.severity.icon());
                        ui.strong(&notification.message);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(egui::RichText::new(&time_str).small().weak());
                        });
                    });
                });
                ui.add_space(4.0);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_notification_is_an_active_toast() {
        let n = Notification::new("saved", Severity::Success);
        assert!(n.is_toast_active());
    }

    #[test]
    fn history_is_bounded() {
        let mut center = NotificationCenter::default();
        for i in 0..15 {
            center.push(format!("message {i}"), Severity::Success);
        }
        assert_eq!(center.notifications.len(), MAX_NOTIFICATIONS);
        // newest stays at the front
        assert_eq!(center.notifications[0].message, "message 14");
    }
}
