//! Xlib calls related to a keyboard.
use super::XlibError;
use crate::XWrap;
use chordwm_core::utils::modmask_lookup::ModMask;
use chordwm_core::XKeysym;
use std::os::raw::{c_uint, c_ulong};
use x11_dl::xlib;

/// Converts a core modifier mask into the xlib wire mask.
#[must_use]
pub fn into_xlib_mask(modifier: &ModMask) -> c_uint {
    let modifier = modifier.clone().clean();
    let mut mask = 0;
    if modifier.contains(ModMask::Shift) {
        mask |= xlib::ShiftMask;
    }
    if modifier.contains(ModMask::Control) {
        mask |= xlib::ControlMask;
    }
    if modifier.contains(ModMask::Alt) {
        mask |= xlib::Mod1Mask;
    }
    if modifier.contains(ModMask::Mod3) {
        mask |= xlib::Mod3Mask;
    }
    if modifier.contains(ModMask::Super) {
        mask |= xlib::Mod4Mask;
    }
    if modifier.contains(ModMask::Mod5) {
        mask |= xlib::Mod5Mask;
    }
    mask
}

/// Converts an xlib key event state into the core modifier mask. The lock
/// modifiers (CapsLock, NumLock) never take part in matching.
#[must_use]
pub fn from_xlib_mask(state: c_uint) -> ModMask {
    let mut mask = ModMask::Zero;
    if state & xlib::ShiftMask != 0 {
        mask |= ModMask::Shift;
    }
    if state & xlib::ControlMask != 0 {
        mask |= ModMask::Control;
    }
    if state & xlib::Mod1Mask != 0 {
        mask |= ModMask::Alt;
    }
    if state & xlib::Mod3Mask != 0 {
        mask |= ModMask::Mod3;
    }
    if state & xlib::Mod4Mask != 0 {
        mask |= ModMask::Super;
    }
    if state & xlib::Mod5Mask != 0 {
        mask |= ModMask::Mod5;
    }
    mask
}

impl XWrap {
    /// Grabs the keysym with the modifier for the root window.
    // `XKeysymToKeycode`: https://tronche.com/gui/x/xlib/utilities/keyboard/XKeysymToKeycode.html
    // `XGrabKey`: https://tronche.com/gui/x/xlib/input/XGrabKey.html
    pub fn grab_keys(&self, root: xlib::Window, keysym: XKeysym, modifiers: c_uint) {
        let code = unsafe { (self.xlib.XKeysymToKeycode)(self.display, c_ulong::from(keysym)) };
        // Grab the keys with and without numlock (Mod2) and caps lock.
        let mods = [
            modifiers,
            modifiers | xlib::Mod2Mask,
            modifiers | xlib::LockMask,
        ];
        for m in &mods {
            unsafe {
                (self.xlib.XGrabKey)(
                    self.display,
                    i32::from(code),
                    *m,
                    root,
                    1,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                );
            }
        }
    }

    /// Drops every key grab and regrabs exactly the given combinations, so
    /// only chords that mean something from the current tree position stay
    /// grabbed.
    // `XUngrabKey`: https://tronche.com/gui/x/xlib/input/XUngrabKey.html
    pub fn reset_grabs(&self, grabs: &[(ModMask, XKeysym)]) {
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
        }
        for (modifier, keysym) in grabs {
            self.grab_keys(self.root, *keysym, into_xlib_mask(modifier));
        }
    }

    /// Updates the keyboard mapping.
    /// # Errors
    ///
    /// Will error if updating the keyboard failed.
    // `XRefreshKeyboardMapping`: https://tronche.com/gui/x/xlib/utilities/keyboard/XRefreshKeyboardMapping.html
    pub fn refresh_keyboard(&self, evt: &mut xlib::XMappingEvent) -> Result<(), XlibError> {
        let status = unsafe { (self.xlib.XRefreshKeyboardMapping)(evt) };
        if status == 0 {
            Err(XlibError::FailedStatus)
        } else {
            Ok(())
        }
    }

    /// Converts a keycode to a keysym.
    // `XkbKeycodeToKeysym`: https://linux.die.net/man/3/xkbkeycodetokeysym
    #[must_use]
    pub fn keycode_to_keysym(&self, keycode: u32) -> XKeysym {
        // Not using XKeysymToKeycode because deprecated.
        let sym = unsafe { (self.xlib.XkbKeycodeToKeysym)(self.display, keycode as u8, 0, 0) };
        sym as XKeysym
    }
}
