//! Transient notices stacked in the top-right corner

use crate::constants::{TOAST_FADE, TOAST_VISIBLE};
use crate::theme;
use crate::types::ToastKind;
use eframe::egui;
use std::time::Instant;

pub type ToastId = u64;

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    /// 1.0 while visible, falling to 0.0 across the fade
    pub fn alpha(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed <= TOAST_VISIBLE {
            1.0
        } else {
            let fading = (elapsed - TOAST_VISIBLE).as_secs_f32();
            (1.0 - fading / TOAST_FADE.as_secs_f32()).max(0.0)
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_VISIBLE + TOAST_FADE
    }
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
}

impl ToastQueue {
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            shown_at: now,
        });
        id
    }

    /// Remove a toast. Returns false when it was already gone, so timer
    /// races and double clicks are harmless.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Restart a toast's display timer (hover keeps it on screen)
    pub fn hold(&mut self, id: ToastId, now: Instant) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.shown_at = now;
        }
    }

    /// Drop every toast whose fade has completed
    pub fn expire(&mut self, now: Instant) -> usize {
        let expired: Vec<ToastId> = self
            .toasts
            .iter()
            .filter(|t| t.is_expired(now))
            .map(|t| t.id)
            .collect();
        expired.iter().filter(|id| self.dismiss(**id)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

/// Render all toasts and expire finished ones. Returns true while any remain,
/// so the caller keeps repainting for the fade.
pub fn render_toasts(ctx: &egui::Context, queue: &mut ToastQueue) -> bool {
    let now = Instant::now();
    queue.expire(now);

    let margin = 20.0;
    let screen = ctx.screen_rect();
    let mut y = screen.top() + margin;
    let mut hovered = Vec::new();

    for toast in queue.iter() {
        let alpha = toast.alpha(now);
        // Slide out to the right while fading
        let slide = (1.0 - alpha) * 40.0;
        let pos = egui::pos2(screen.right() - margin + slide, y);

        let response = egui::Area::new(egui::Id::new(("update_toast", toast.id)))
            .fixed_pos(pos)
            .pivot(egui::Align2::RIGHT_TOP)
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::with_alpha(theme::toast_color(toast.kind), alpha))
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::symmetric(20, 12))
                    .show(ui, |ui| {
                        ui.set_max_width(theme::TOAST_MAX_WIDTH);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&toast.message)
                                    .color(theme::with_alpha(theme::TEXT_PRIMARY, alpha))
                                    .strong(),
                            )
                            .wrap(),
                        );
                    });
            });

        if response.response.hovered() {
            hovered.push(toast.id);
        }
        y += response.response.rect.height() + theme::SPACING_MD;
    }

    for id in hovered {
        queue.hold(id, now);
    }
    !queue.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut queue = ToastQueue::default();
        let now = Instant::now();
        let id = queue.push("Updated", ToastKind::Success, now);

        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expire_after_visible_and_fade() {
        let mut queue = ToastQueue::default();
        let now = Instant::now();
        queue.push("one", ToastKind::Info, now);

        assert_eq!(queue.expire(now + TOAST_VISIBLE), 0);
        assert_eq!(queue.expire(now + TOAST_VISIBLE + TOAST_FADE), 1);
        // A late timer firing on an already removed toast
        assert_eq!(queue.expire(now + Duration::from_secs(60)), 0);
    }

    #[test]
    fn test_alpha_fades_out() {
        let mut queue = ToastQueue::default();
        let now = Instant::now();
        queue.push("fading", ToastKind::Error, now);
        let toast = queue.iter().next().unwrap();

        assert_eq!(toast.alpha(now), 1.0);
        let mid = toast.alpha(now + TOAST_VISIBLE + TOAST_FADE / 2);
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(toast.alpha(now + TOAST_VISIBLE + TOAST_FADE), 0.0);
    }

    #[test]
    fn test_hold_restarts_timer() {
        let mut queue = ToastQueue::default();
        let now = Instant::now();
        let id = queue.push("hover me", ToastKind::Info, now);

        queue.hold(id, now + TOAST_VISIBLE);
        assert_eq!(queue.expire(now + TOAST_VISIBLE + TOAST_FADE), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = ToastQueue::default();
        let now = Instant::now();
        let a = queue.push("a", ToastKind::Info, now);
        let b = queue.push("b", ToastKind::Info, now);
        assert_ne!(a, b);
        assert!(queue.dismiss(a));
        assert_eq!(queue.iter().next().map(|t| t.id), Some(b));
    }
}
