//! Visibility decisions for the page's scroll animations.
//!
//! The host owns the actual observers; these types only decide what to do
//! with each intersection report.

/// One intersection report for an observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Start the element's animation, then stop observing it.
    AnimateAndUnobserve,
    Show,
    Hide,
    Nothing,
}

/// Observer options the host should register with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub bottom_margin_px: i32,
}

impl ObserverOptions {
    /// Whether the entry is in view by at least `threshold` of its area.
    pub fn is_visible(&self, entry: VisibilityEntry) -> bool {
        entry.is_intersecting && entry.intersection_ratio >= self.threshold
    }
}

/// `.reveal` elements animate once, the first time they scroll into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOnce {
    pub options: ObserverOptions,
}

impl Default for RevealOnce {
    fn default() -> Self {
        Self {
            options: ObserverOptions {
                threshold: 0.2,
                bottom_margin_px: 0,
            },
        }
    }
}

impl RevealOnce {
    pub fn decide(&self, entry: VisibilityEntry) -> RevealAction {
        if self.options.is_visible(entry) {
            RevealAction::AnimateAndUnobserve
        } else {
            RevealAction::Nothing
        }
    }
}

/// Section titles and grids fade in whenever they enter the viewport and
/// fade out again when they leave, so the effect repeats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeToggle {
    pub options: ObserverOptions,
}

impl Default for FadeToggle {
    fn default() -> Self {
        Self {
            options: ObserverOptions {
                threshold: 0.15,
                bottom_margin_px: -80,
            },
        }
    }
}

impl FadeToggle {
    pub fn decide(&self, entry: VisibilityEntry) -> RevealAction {
        if self.options.is_visible(entry) {
            RevealAction::Show
        } else {
            RevealAction::Hide
        }
    }

    /// Elements already on screen at load are shown without waiting for the
    /// first observer callback.
    pub fn initially_visible(
        &self,
        rect_top: f64,
        rect_bottom: f64,
        viewport_height: f64,
    ) -> bool {
        rect_top < viewport_height && rect_bottom > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN: VisibilityEntry = VisibilityEntry {
        is_intersecting: true,
        intersection_ratio: 0.5,
    };
    const OUT: VisibilityEntry = VisibilityEntry {
        is_intersecting: false,
        intersection_ratio: 0.0,
    };

    #[test]
    fn reveal_once_only_fires_on_entry() {
        let reveal = RevealOnce::default();
        assert_eq!(reveal.decide(IN), RevealAction::AnimateAndUnobserve);
        assert_eq!(reveal.decide(OUT), RevealAction::Nothing);
    }

    #[test]
    fn fade_toggle_repeats() {
        let fade = FadeToggle::default();
        assert_eq!(fade.decide(IN), RevealAction::Show);
        assert_eq!(fade.decide(OUT), RevealAction::Hide);
        assert_eq!(fade.options.bottom_margin_px, -80);
    }

    #[test]
    fn ratio_below_threshold_does_not_count() {
        let edge = VisibilityEntry {
            is_intersecting: true,
            intersection_ratio: 0.1,
        };
        assert_eq!(RevealOnce::default().decide(edge), RevealAction::Nothing);
        assert_eq!(FadeToggle::default().decide(edge), RevealAction::Hide);

        let partial = VisibilityEntry {
            is_intersecting: true,
            intersection_ratio: 0.15,
        };
        assert_eq!(RevealOnce::default().decide(partial), RevealAction::Nothing);
        assert_eq!(FadeToggle::default().decide(partial), RevealAction::Show);
    }

    #[test]
    fn initial_visibility_uses_viewport_bounds() {
        let fade = FadeToggle::default();
        assert!(fade.initially_visible(100.0, 300.0, 800.0));
        assert!(!fade.initially_visible(900.0, 1100.0, 800.0));
        assert!(!fade.initially_visible(-300.0, 0.0, 800.0));
    }
}
