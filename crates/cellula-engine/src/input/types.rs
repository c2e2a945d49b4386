/// Platform-agnostic key identity.
///
/// Only keys the runtime can meaningfully report are listed; everything
/// else maps to `Unknown` with the platform scancode preserved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Unknown(u32),
}

/// Key transition direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event delivered to `InputState`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InputEvent {
    /// Window focus changed.
    Focused(bool),

    /// Key transition.
    Key {
        key: Key,
        state: KeyState,
        /// Whether this is an OS auto-repeat of a held key.
        repeat: bool,
    },
}
