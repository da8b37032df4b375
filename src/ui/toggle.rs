use eframe::egui::{self, Response, Sense, StrokeKind, Ui};

// ---------------------------------------------------------------------------
// Animated on/off switch
// ---------------------------------------------------------------------------

/// Where the knob is.  egui's animation clock drives `Animating` between the
/// two resting states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchPhase {
    Off,
    Animating,
    On,
}

impl SwitchPhase {
    /// Classify an animation position in `[0, 1]`.
    pub fn from_position(how_on: f32) -> Self {
        if how_on <= 0.0 {
            SwitchPhase::Off
        } else if how_on >= 1.0 {
            SwitchPhase::On
        } else {
            SwitchPhase::Animating
        }
    }
}

/// A pill-shaped switch, knob right when `on`.
pub fn toggle_switch(ui: &mut Ui, on: &mut bool) -> Response {
    let desired_size = ui.spacing().interact_size.y * egui::vec2(2.0, 1.0);
    let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool_responsive(response.id, *on);
        if SwitchPhase::from_position(how_on) == SwitchPhase::Animating {
            ui.ctx().request_repaint();
        }
        let visuals = ui.style().interact_selectable(&response, *on);
        let rect = rect.expand(visuals.expansion);
        let radius = 0.5 * rect.height();
        ui.painter()
            .rect(rect, radius, visuals.bg_fill, visuals.bg_stroke, StrokeKind::Inside);
        let circle_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
        let center = egui::pos2(circle_x, rect.center().y);
        ui.painter()
            .circle(center, 0.75 * radius, visuals.bg_fill, visuals.fg_stroke);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_from_animation_position() {
        assert_eq!(SwitchPhase::from_position(0.0), SwitchPhase::Off);
        assert_eq!(SwitchPhase::from_position(0.4), SwitchPhase::Animating);
        assert_eq!(SwitchPhase::from_position(1.0), SwitchPhase::On);
    }
}
