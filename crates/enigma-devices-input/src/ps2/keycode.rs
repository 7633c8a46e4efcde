//! Translated key codes, event flag bits and raw protocol bytes.
//!
//! A translated key event is 16 bits: the low byte is one of the `KEY_*`
//! codes below, the high byte carries the `EVENT_*` flags. Letter and digit
//! codes coincide with their ASCII values, which is what lets the
//! application compare against `'A'..='Z'` directly.

/// Flag bits in the high byte of a translated key event.
pub const EVENT_BREAK: u16 = 0x8000;
pub const EVENT_SHIFT: u16 = 0x4000;
pub const EVENT_CTRL: u16 = 0x2000;
pub const EVENT_CAPS: u16 = 0x1000;
pub const EVENT_ALT: u16 = 0x0800;
pub const EVENT_ALT_GR: u16 = 0x0400;
pub const EVENT_GUI: u16 = 0x0200;
pub const EVENT_FUNCTION: u16 = 0x0100;

/// Same flags as a status byte (the event high byte before shifting).
pub(crate) const STATUS_BREAK: u8 = 0x80;
pub(crate) const STATUS_SHIFT: u8 = 0x40;
pub(crate) const STATUS_CTRL: u8 = 0x20;
pub(crate) const STATUS_CAPS: u8 = 0x10;
pub(crate) const STATUS_ALT: u8 = 0x08;
pub(crate) const STATUS_ALT_GR: u8 = 0x04;
pub(crate) const STATUS_GUI: u8 = 0x02;
pub(crate) const STATUS_FUNCTION: u8 = 0x01;

/// Lock mask bits, mirroring the keyboard LEDs.
pub const LOCK_SCROLL: u8 = 0x01;
pub const LOCK_NUM: u8 = 0x02;
pub const LOCK_CAPS: u8 = 0x04;
/// Rarely wired fourth LED on some keyboards.
pub const LOCK_EXTRA: u8 = 0x08;

/// Host-to-device command bytes.
pub const CMD_SET_LEDS: u8 = 0xED;
pub const CMD_ECHO: u8 = 0xEE;
pub const CMD_SCANCODE_SET: u8 = 0xF0;
pub const CMD_READ_ID: u8 = 0xF2;
pub const CMD_TYPEMATIC: u8 = 0xF3;
pub const CMD_RESEND: u8 = 0xFE;
pub const CMD_RESET: u8 = 0xFF;

/// Device-to-host responses and framing bytes.
pub const RSP_BAT_PASS: u8 = 0xAA;
pub const RSP_BAT_FAIL: u8 = 0xFC;
pub const RSP_ACK: u8 = 0xFA;
pub const RSP_ECHO: u8 = 0xEE;
pub const RSP_RESEND: u8 = 0xFE;
pub const RSP_OVERRUN: u8 = 0xFF;

/// Scan-stream prefix bytes.
pub(crate) const SC_EXTEND: u8 = 0xE0;
pub(crate) const SC_EXTEND_PAUSE: u8 = 0xE1;
pub(crate) const SC_BREAK: u8 = 0xF0;
/// The two multilingual make codes that live above the response range.
pub(crate) const SC_LANG1: u8 = 0xF2;
pub(crate) const SC_LANG2: u8 = 0xF1;

/// Placeholder queued behind a command byte for each response byte the
/// device will answer with; also the "swallow this event" sentinel from
/// translation.
pub const KEY_IGNORE: u8 = 0xFF;

// Translated key codes. Lock and modifier handling relies on the low
// ranges staying contiguous: locks 0x01..=0x03, modifiers 0x06..=0x0D,
// keypad 0x20..=0x2A.
pub const KEY_NUM: u8 = 0x01;
pub const KEY_SCROLL: u8 = 0x02;
pub const KEY_CAPS: u8 = 0x03;
pub const KEY_PRTSCR: u8 = 0x04;
pub const KEY_PAUSE: u8 = 0x05;
pub const KEY_L_SHIFT: u8 = 0x06;
pub const KEY_R_SHIFT: u8 = 0x07;
pub const KEY_L_CTRL: u8 = 0x08;
pub const KEY_R_CTRL: u8 = 0x09;
pub const KEY_L_ALT: u8 = 0x0A;
pub const KEY_R_ALT: u8 = 0x0B;
pub const KEY_L_GUI: u8 = 0x0C;
pub const KEY_R_GUI: u8 = 0x0D;
pub const KEY_MENU: u8 = 0x0E;
/// Ctrl+Pause, generated inside the keyboard.
pub const KEY_BREAK: u8 = 0x0F;
/// Alt+PrintScreen, likewise keyboard-generated.
pub const KEY_SYSRQ: u8 = 0x10;
pub const KEY_HOME: u8 = 0x11;
pub const KEY_END: u8 = 0x12;
pub const KEY_PGUP: u8 = 0x13;
pub const KEY_PGDN: u8 = 0x14;
pub const KEY_L_ARROW: u8 = 0x15;
pub const KEY_R_ARROW: u8 = 0x16;
pub const KEY_UP_ARROW: u8 = 0x17;
pub const KEY_DN_ARROW: u8 = 0x18;
pub const KEY_INSERT: u8 = 0x19;
pub const KEY_DELETE: u8 = 0x1A;
pub const KEY_ESC: u8 = 0x1B;
pub const KEY_BS: u8 = 0x1C;
pub const KEY_TAB: u8 = 0x1D;
pub const KEY_ENTER: u8 = 0x1E;
pub const KEY_SPACE: u8 = 0x1F;
pub const KEY_KP0: u8 = 0x20;
pub const KEY_KP1: u8 = 0x21;
pub const KEY_KP2: u8 = 0x22;
pub const KEY_KP3: u8 = 0x23;
pub const KEY_KP4: u8 = 0x24;
pub const KEY_KP5: u8 = 0x25;
pub const KEY_KP6: u8 = 0x26;
pub const KEY_KP7: u8 = 0x27;
pub const KEY_KP8: u8 = 0x28;
pub const KEY_KP9: u8 = 0x29;
pub const KEY_KP_DOT: u8 = 0x2A;
pub const KEY_KP_ENTER: u8 = 0x2B;
pub const KEY_KP_PLUS: u8 = 0x2C;
pub const KEY_KP_MINUS: u8 = 0x2D;
pub const KEY_KP_TIMES: u8 = 0x2E;
pub const KEY_KP_DIV: u8 = 0x2F;
pub const KEY_0: u8 = 0x30;
pub const KEY_1: u8 = 0x31;
pub const KEY_2: u8 = 0x32;
pub const KEY_3: u8 = 0x33;
pub const KEY_4: u8 = 0x34;
pub const KEY_5: u8 = 0x35;
pub const KEY_6: u8 = 0x36;
pub const KEY_7: u8 = 0x37;
pub const KEY_8: u8 = 0x38;
pub const KEY_9: u8 = 0x39;
pub const KEY_APOS: u8 = 0x3A;
pub const KEY_COMMA: u8 = 0x3B;
pub const KEY_MINUS: u8 = 0x3C;
pub const KEY_DOT: u8 = 0x3D;
pub const KEY_DIV: u8 = 0x3E;
/// `=` on the right keypad of some numeric keyboards.
pub const KEY_KP_EQUAL: u8 = 0x3F;
/// Back quote / single quote key.
pub const KEY_SINGLE: u8 = 0x40;
pub const KEY_A: u8 = 0x41;
pub const KEY_B: u8 = 0x42;
pub const KEY_C: u8 = 0x43;
pub const KEY_D: u8 = 0x44;
pub const KEY_E: u8 = 0x45;
pub const KEY_F: u8 = 0x46;
pub const KEY_G: u8 = 0x47;
pub const KEY_H: u8 = 0x48;
pub const KEY_I: u8 = 0x49;
pub const KEY_J: u8 = 0x4A;
pub const KEY_K: u8 = 0x4B;
pub const KEY_L: u8 = 0x4C;
pub const KEY_M: u8 = 0x4D;
pub const KEY_N: u8 = 0x4E;
pub const KEY_O: u8 = 0x4F;
pub const KEY_P: u8 = 0x50;
pub const KEY_Q: u8 = 0x51;
pub const KEY_R: u8 = 0x52;
pub const KEY_S: u8 = 0x53;
pub const KEY_T: u8 = 0x54;
pub const KEY_U: u8 = 0x55;
pub const KEY_V: u8 = 0x56;
pub const KEY_W: u8 = 0x57;
pub const KEY_X: u8 = 0x58;
pub const KEY_Y: u8 = 0x59;
pub const KEY_Z: u8 = 0x5A;
pub const KEY_SEMI: u8 = 0x5B;
pub const KEY_BACK: u8 = 0x5C;
pub const KEY_OPEN_SQ: u8 = 0x5D;
pub const KEY_CLOSE_SQ: u8 = 0x5E;
pub const KEY_EQUAL: u8 = 0x5F;
/// Comma on some numeric keypads.
pub const KEY_KP_COMMA: u8 = 0x60;
pub const KEY_F1: u8 = 0x61;
pub const KEY_F2: u8 = 0x62;
pub const KEY_F3: u8 = 0x63;
pub const KEY_F4: u8 = 0x64;
pub const KEY_F5: u8 = 0x65;
pub const KEY_F6: u8 = 0x66;
pub const KEY_F7: u8 = 0x67;
pub const KEY_F8: u8 = 0x68;
pub const KEY_F9: u8 = 0x69;
pub const KEY_F10: u8 = 0x6A;
pub const KEY_F11: u8 = 0x6B;
pub const KEY_F12: u8 = 0x6C;
pub const KEY_NEXT_TR: u8 = 0x79;
pub const KEY_PREV_TR: u8 = 0x7A;
pub const KEY_STOP: u8 = 0x7B;
pub const KEY_PLAY: u8 = 0x7C;
pub const KEY_MUTE: u8 = 0x7D;
pub const KEY_VOL_UP: u8 = 0x7E;
pub const KEY_VOL_DN: u8 = 0x7F;
pub const KEY_MEDIA: u8 = 0x80;
pub const KEY_EMAIL: u8 = 0x81;
pub const KEY_CALC: u8 = 0x82;
pub const KEY_COMPUTER: u8 = 0x83;
pub const KEY_WEB_SEARCH: u8 = 0x84;
pub const KEY_WEB_HOME: u8 = 0x85;
pub const KEY_WEB_BACK: u8 = 0x86;
pub const KEY_WEB_FORWARD: u8 = 0x87;
pub const KEY_WEB_STOP: u8 = 0x88;
pub const KEY_WEB_REFRESH: u8 = 0x89;
pub const KEY_WEB_FAVOR: u8 = 0x8A;
/// The extra key on 102/105-key European layouts.
pub const KEY_EUROPE2: u8 = 0x8B;
pub const KEY_POWER: u8 = 0x8C;
pub const KEY_SLEEP: u8 = 0x8D;
pub const KEY_WAKE: u8 = 0x90;
pub const KEY_INTL1: u8 = 0x91;
pub const KEY_INTL2: u8 = 0x92;
pub const KEY_INTL3: u8 = 0x93;
pub const KEY_INTL4: u8 = 0x94;
pub const KEY_INTL5: u8 = 0x95;
pub const KEY_LANG1: u8 = 0x96;
pub const KEY_LANG2: u8 = 0x97;
pub const KEY_LANG3: u8 = 0x98;
pub const KEY_LANG4: u8 = 0x99;
pub const KEY_LANG5: u8 = 0xA0;
