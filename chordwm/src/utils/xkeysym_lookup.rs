//! Key names as they appear in `config.toml`, resolved to X11 keysyms.
//!
//! Names follow `X11/keysymdef.h` with the `XK_` prefix dropped, so the
//! same spelling works in `xmodmap` output and in the config file.

use chordwm_core::XKeysym;
use x11_dl::keysym;

/// Resolve a key name to its keysym. `None` means the name is not one we
/// know, which the config loader reports as an invalid binding.
#[must_use]
pub fn into_keysym(key: &str) -> Option<XKeysym> {
    let sym = match key {
        "a" => keysym::XK_a,
        "b" => keysym::XK_b,
        "c" => keysym::XK_c,
        "d" => keysym::XK_d,
        "e" => keysym::XK_e,
        "f" => keysym::XK_f,
        "g" => keysym::XK_g,
        "h" => keysym::XK_h,
        "i" => keysym::XK_i,
        "j" => keysym::XK_j,
        "k" => keysym::XK_k,
        "l" => keysym::XK_l,
        "m" => keysym::XK_m,
        "n" => keysym::XK_n,
        "o" => keysym::XK_o,
        "p" => keysym::XK_p,
        "q" => keysym::XK_q,
        "r" => keysym::XK_r,
        "s" => keysym::XK_s,
        "t" => keysym::XK_t,
        "u" => keysym::XK_u,
        "v" => keysym::XK_v,
        "w" => keysym::XK_w,
        "x" => keysym::XK_x,
        "y" => keysym::XK_y,
        "z" => keysym::XK_z,
        "A" => keysym::XK_A,
        "B" => keysym::XK_B,
        "C" => keysym::XK_C,
        "D" => keysym::XK_D,
        "E" => keysym::XK_E,
        "F" => keysym::XK_F,
        "G" => keysym::XK_G,
        "H" => keysym::XK_H,
        "I" => keysym::XK_I,
        "J" => keysym::XK_J,
        "K" => keysym::XK_K,
        "L" => keysym::XK_L,
        "M" => keysym::XK_M,
        "N" => keysym::XK_N,
        "O" => keysym::XK_O,
        "P" => keysym::XK_P,
        "Q" => keysym::XK_Q,
        "R" => keysym::XK_R,
        "S" => keysym::XK_S,
        "T" => keysym::XK_T,
        "U" => keysym::XK_U,
        "V" => keysym::XK_V,
        "W" => keysym::XK_W,
        "X" => keysym::XK_X,
        "Y" => keysym::XK_Y,
        "Z" => keysym::XK_Z,
        "0" => keysym::XK_0,
        "1" => keysym::XK_1,
        "2" => keysym::XK_2,
        "3" => keysym::XK_3,
        "4" => keysym::XK_4,
        "5" => keysym::XK_5,
        "6" => keysym::XK_6,
        "7" => keysym::XK_7,
        "8" => keysym::XK_8,
        "9" => keysym::XK_9,
        "F1" => keysym::XK_F1,
        "F2" => keysym::XK_F2,
        "F3" => keysym::XK_F3,
        "F4" => keysym::XK_F4,
        "F5" => keysym::XK_F5,
        "F6" => keysym::XK_F6,
        "F7" => keysym::XK_F7,
        "F8" => keysym::XK_F8,
        "F9" => keysym::XK_F9,
        "F10" => keysym::XK_F10,
        "F11" => keysym::XK_F11,
        "F12" => keysym::XK_F12,
        "Return" => keysym::XK_Return,
        "space" => keysym::XK_space,
        "Escape" => keysym::XK_Escape,
        "Tab" => keysym::XK_Tab,
        "BackSpace" => keysym::XK_BackSpace,
        "Delete" => keysym::XK_Delete,
        "Insert" => keysym::XK_Insert,
        "Home" => keysym::XK_Home,
        "End" => keysym::XK_End,
        "Prior" => keysym::XK_Prior,
        "Next" => keysym::XK_Next,
        "Up" => keysym::XK_Up,
        "Down" => keysym::XK_Down,
        "Left" => keysym::XK_Left,
        "Right" => keysym::XK_Right,
        "Print" => keysym::XK_Print,
        "comma" => keysym::XK_comma,
        "period" => keysym::XK_period,
        "slash" => keysym::XK_slash,
        "backslash" => keysym::XK_backslash,
        "semicolon" => keysym::XK_semicolon,
        "apostrophe" => keysym::XK_apostrophe,
        "bracketleft" => keysym::XK_bracketleft,
        "bracketright" => keysym::XK_bracketright,
        "minus" => keysym::XK_minus,
        "equal" => keysym::XK_equal,
        "grave" => keysym::XK_grave,
        _ => return None,
    };
    Some(sym)
}

#[cfg(test)]
mod tests {
    use super::into_keysym;

    #[test]
    fn letters_and_specials_resolve() {
        assert_eq!(into_keysym("t"), Some(x11_dl::keysym::XK_t));
        assert_eq!(into_keysym("Return"), Some(x11_dl::keysym::XK_Return));
        assert_eq!(into_keysym("F11"), Some(x11_dl::keysym::XK_F11));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(into_keysym("NotAKey"), None);
        assert_eq!(into_keysym(""), None);
    }
}
