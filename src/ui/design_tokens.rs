// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared visual constants for every screen of the greeting.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use greeting_reel::ui::design_tokens::{opacity, palette, spacing};
use iced::Color;

let scrim = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.12);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.33);
    pub const GRAY_400: Color = Color::from_rgb(0.55, 0.55, 0.58);
    pub const GRAY_100: Color = Color::from_rgb(0.94, 0.93, 0.95);

    // Party accents
    pub const PINK_400: Color = Color::from_rgb(0.98, 0.45, 0.68);
    pub const PINK_600: Color = Color::from_rgb(0.86, 0.24, 0.52);
    pub const PURPLE_500: Color = Color::from_rgb(0.55, 0.36, 0.96);
    pub const PURPLE_900: Color = Color::from_rgb(0.16, 0.08, 0.3);
    pub const GOLD_400: Color = Color::from_rgb(0.99, 0.8, 0.3);

    /// Polaroid frame.
    pub const PAPER: Color = Color::from_rgb(0.99, 0.98, 0.95);
}

// ============================================================================
// Opacity
// ============================================================================

pub mod opacity {
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HEAVY: f32 = 0.85;
}

// ============================================================================
// Spacing (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing
// ============================================================================

pub mod sizing {
    /// Gallery slide artwork.
    pub const SLIDE_IMAGE: f32 = 320.0;
    pub const GIFT_IMAGE: f32 = 260.0;
    pub const TICKET_IMAGE: f32 = 220.0;

    pub const DOT: f32 = 10.0;
    pub const DOT_ACTIVE: f32 = 14.0;

    /// Polaroid card including its frame.
    pub const CARD_WIDTH: f32 = 300.0;
    pub const CARD_PHOTO: f32 = 270.0;

    pub const PLAYER_BAR_HEIGHT: f32 = 64.0;
    pub const PLAY_BUTTON: f32 = 40.0;
}

// ============================================================================
// Typography
// ============================================================================

pub mod typography {
    pub const DISPLAY: f32 = 48.0;
    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Radius
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

/// `color` with its alpha replaced.
#[must_use]
pub const fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::OVERLAY_MEDIUM > 0.0 && opacity::OVERLAY_MEDIUM < 1.0);
    assert!(opacity::OVERLAY_STRONG > opacity::OVERLAY_MEDIUM);
    assert!(opacity::OVERLAY_HEAVY > opacity::OVERLAY_STRONG && opacity::OVERLAY_HEAVY < 1.0);

    assert!(sizing::DOT_ACTIVE > sizing::DOT);
    assert!(sizing::CARD_WIDTH > sizing::CARD_PHOTO);

    assert!(typography::DISPLAY > typography::TITLE_LG);
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = with_alpha(palette::PINK_400, 0.3);
        assert_eq!(c.r, palette::PINK_400.r);
        assert_eq!(c.a, 0.3);
    }

    #[test]
    fn overlay_opacities_deepen_in_order() {
        let levels = [
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_STRONG,
            opacity::OVERLAY_HEAVY,
        ];
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(levels.iter().all(|a| (0.0..1.0).contains(a)));
    }
}
