pub mod log;
pub mod xkeysym_lookup;
