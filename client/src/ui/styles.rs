//! Shared UI styles - dusk blue palette

use bevy::prelude::*;

/// Dim veil over the scene while the cursor is free
pub const BLOCKER_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);

/// Instruction card behind the buttons
pub const CARD_BACKGROUND: Color = Color::srgba(0.03, 0.06, 0.12, 0.85);

pub const BUTTON_NORMAL: Color = Color::srgb(0.06, 0.14, 0.28);
pub const BUTTON_HOVERED: Color = Color::srgb(0.09, 0.24, 0.46);
pub const BUTTON_PRESSED: Color = Color::srgb(0.06, 0.36, 0.70); // #0f5bb3

pub const BUTTON_BORDER: Color = Color::srgb(0.20, 0.35, 0.55);

/// Accent - pale sky blue
pub const ACCENT_COLOR: Color = Color::srgb(0.55, 0.78, 1.0);

/// Text colors
pub const TEXT_COLOR: Color = Color::srgb(0.93, 0.95, 0.98);
pub const TEXT_MUTED: Color = Color::srgb(0.55, 0.60, 0.68);

/// Standard button style
pub fn button_style() -> Node {
    Node {
        width: Val::Px(260.0),
        height: Val::Px(52.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        margin: UiRect::all(Val::Px(8.0)),
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 22.0,
        ..default()
    }
}

pub fn title_text_style() -> TextFont {
    TextFont {
        font_size: 56.0,
        ..default()
    }
}

pub fn hint_text_style() -> TextFont {
    TextFont {
        font_size: 16.0,
        ..default()
    }
}
