// SPDX-License-Identifier: MIT
//
// Horizontal alignment within a fixed-width field.

use unicode_width::UnicodeWidthStr;

/// Where a string sits inside a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// Display width of `text` in terminal columns.
#[inline]
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.width()
}

/// Starting column of `text` inside a `width`-column field.
///
/// Left is 0, Right is the full slack, Center is half the slack rounded
/// down (an odd leftover column ends up on the right). The result is
/// negative when the text is wider than the field; nothing is clamped.
#[must_use]
pub fn offset(align: Align, width: u16, text: &str) -> i32 {
    let len = i32::try_from(text_width(text)).unwrap_or(i32::MAX);
    let slack = i32::from(width).saturating_sub(len);
    match align {
        Align::Left => 0,
        Align::Right => slack,
        Align::Center => slack.div_euclid(2),
    }
}
