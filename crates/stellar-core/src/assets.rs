//! Static asset paths passed through to the renderer untouched.

/// Stellar logo shown on the home screen.
pub const LOGO: &str = "/images/stellar-logo.png";

/// Level-select map backdrop.
pub const LEVEL_SELECT_BACKGROUND: &str = "/images/game-interface.png";

/// Minigame backdrop.
pub const GAME_BACKGROUND: &str = "/images/gameplay-scene.png";

/// XLM coin: level-select balance icon and falling reward tokens.
pub const XLM_TOKEN: &str = "/images/stellar-xlm-logo.jpeg";
