use serde::{Deserialize, Serialize};

/// How a session was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Role picker on the demo screen
    Demo,
    /// Verified Telegram Mini App initData
    Telegram,
}
