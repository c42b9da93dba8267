//! Command words typed at the prompt.

pub const CMD_NEXT: &str = "next";
pub const CMD_SIGN_UP: &str = "signup";
pub const CMD_SIGN_UP_SHORT: &str = "s";
pub const CMD_PROMOTE: &str = "promote";
pub const CMD_MEDIA: &str = "media";
pub const CMD_GENERATE: &str = "generate";
pub const CMD_GENERATE_SHORT: &str = "g";
pub const CMD_NEW: &str = "new";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

pub const PROMPT: &str = "> ";
