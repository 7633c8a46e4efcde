//! Scan Code Set 2 translation tables.

use super::keycode::*;

/// Single-byte make codes.
pub(super) fn single_code(scan: u8) -> Option<u8> {
    let key = match scan {
        0x01 => KEY_F9,
        0x03 => KEY_F5,
        0x04 => KEY_F3,
        0x05 => KEY_F1,
        0x06 => KEY_F2,
        0x07 => KEY_F12,
        0x09 => KEY_F10,
        0x0A => KEY_F8,
        0x0B => KEY_F6,
        0x0C => KEY_F4,
        0x0D => KEY_TAB,
        0x0E => KEY_SINGLE,
        0x0F => KEY_KP_EQUAL,
        0x11 => KEY_L_ALT,
        0x12 => KEY_L_SHIFT,
        0x13 => KEY_INTL2, // Katakana/Hiragana
        0x14 => KEY_L_CTRL,
        0x15 => KEY_Q,
        0x16 => KEY_1,
        0x1A => KEY_Z,
        0x1B => KEY_S,
        0x1C => KEY_A,
        0x1D => KEY_W,
        0x1E => KEY_2,
        0x21 => KEY_C,
        0x22 => KEY_X,
        0x23 => KEY_D,
        0x24 => KEY_E,
        0x25 => KEY_4,
        0x26 => KEY_3,
        0x29 => KEY_SPACE,
        0x2A => KEY_V,
        0x2B => KEY_F,
        0x2C => KEY_T,
        0x2D => KEY_R,
        0x2E => KEY_5,
        0x31 => KEY_N,
        0x32 => KEY_B,
        0x33 => KEY_H,
        0x34 => KEY_G,
        0x35 => KEY_Y,
        0x36 => KEY_6,
        0x3A => KEY_M,
        0x3B => KEY_J,
        0x3C => KEY_U,
        0x3D => KEY_7,
        0x3E => KEY_8,
        0x41 => KEY_COMMA,
        0x42 => KEY_K,
        0x43 => KEY_I,
        0x44 => KEY_O,
        0x45 => KEY_0,
        0x46 => KEY_9,
        0x49 => KEY_DOT,
        0x4A => KEY_DIV,
        0x4B => KEY_L,
        0x4C => KEY_SEMI,
        0x4D => KEY_P,
        0x4E => KEY_MINUS,
        0x51 => KEY_INTL1, // Ro
        0x52 => KEY_APOS,
        0x54 => KEY_OPEN_SQ,
        0x55 => KEY_EQUAL,
        0x58 => KEY_CAPS,
        0x59 => KEY_R_SHIFT,
        0x5A => KEY_ENTER,
        0x5B => KEY_CLOSE_SQ,
        0x5D => KEY_BACK,
        0x61 => KEY_EUROPE2,
        0x64 => KEY_INTL4, // Henkan
        0x66 => KEY_BS,
        0x67 => KEY_INTL5, // Muhenkan
        0x69 => KEY_KP1,
        0x6A => KEY_INTL3, // Yen
        0x6B => KEY_KP4,
        0x6C => KEY_KP7,
        0x6D => KEY_KP_COMMA,
        0x70 => KEY_KP0,
        0x71 => KEY_KP_DOT,
        0x72 => KEY_KP2,
        0x73 => KEY_KP5,
        0x74 => KEY_KP6,
        0x75 => KEY_KP8,
        0x76 => KEY_ESC,
        0x77 => KEY_NUM,
        0x78 => KEY_F11,
        0x79 => KEY_KP_PLUS,
        0x7A => KEY_KP3,
        0x7B => KEY_KP_MINUS,
        0x7C => KEY_KP_TIMES,
        0x7D => KEY_KP9,
        0x7E => KEY_SCROLL,
        0x83 => KEY_F7,
        0x84 => KEY_SYSRQ,
        0xF1 => KEY_LANG2, // Hanja
        0xF2 => KEY_LANG1, // Hangul
        _ => return None,
    };
    Some(key)
}

/// E0-prefixed make codes.
pub(super) fn extended_code(scan: u8) -> Option<u8> {
    let key = match scan {
        0x10 => KEY_WEB_SEARCH,
        0x11 => KEY_R_ALT,
        // Fake-shift filler emitted around Print Screen and the navigation
        // cluster; swallowed after translation.
        0x12 => KEY_IGNORE,
        0x14 => KEY_R_CTRL,
        0x15 => KEY_PREV_TR,
        0x18 => KEY_WEB_FAVOR,
        0x1F => KEY_L_GUI,
        0x20 => KEY_WEB_REFRESH,
        0x21 => KEY_VOL_DN,
        0x23 => KEY_MUTE,
        0x27 => KEY_R_GUI,
        0x28 => KEY_WEB_STOP,
        0x2B => KEY_CALC,
        0x2F => KEY_MENU,
        0x30 => KEY_WEB_FORWARD,
        0x32 => KEY_VOL_UP,
        0x34 => KEY_PLAY,
        0x37 => KEY_POWER,
        0x38 => KEY_WEB_BACK,
        0x3A => KEY_WEB_HOME,
        0x3B => KEY_STOP,
        0x3F => KEY_SLEEP,
        0x40 => KEY_COMPUTER,
        0x48 => KEY_EMAIL,
        0x4A => KEY_KP_DIV,
        0x4D => KEY_NEXT_TR,
        0x50 => KEY_MEDIA,
        0x59 => KEY_IGNORE, // fake shift
        0x5A => KEY_KP_ENTER,
        0x5E => KEY_WAKE,
        0x69 => KEY_END,
        0x6B => KEY_L_ARROW,
        0x6C => KEY_HOME,
        0x70 => KEY_INSERT,
        0x71 => KEY_DELETE,
        0x72 => KEY_DN_ARROW,
        0x74 => KEY_R_ARROW,
        0x75 => KEY_UP_ARROW,
        0x7A => KEY_PGDN,
        0x7C => KEY_PRTSCR,
        0x7D => KEY_PGUP,
        0x7E => KEY_BREAK, // Ctrl+Pause
        _ => return None,
    };
    Some(key)
}

/// Keypad-to-navigation remap applied when Num Lock is off or Shift is
/// held. KP5 has no navigation twin and is swallowed.
pub(super) fn keypad_nav_remap(key: u8) -> u8 {
    match key {
        KEY_KP0 => KEY_INSERT,
        KEY_KP1 => KEY_END,
        KEY_KP2 => KEY_DN_ARROW,
        KEY_KP3 => KEY_PGDN,
        KEY_KP4 => KEY_L_ARROW,
        KEY_KP5 => KEY_IGNORE,
        KEY_KP6 => KEY_R_ARROW,
        KEY_KP7 => KEY_HOME,
        KEY_KP8 => KEY_UP_ARROW,
        KEY_KP9 => KEY_PGUP,
        KEY_KP_DOT => KEY_DELETE,
        other => other,
    }
}
