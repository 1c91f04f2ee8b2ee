use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::shipping::RatesConfig;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<RatesConfig>,

    /// Where the user store lives (defaults to ~/.config/ship-fee/users.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_file: Option<PathBuf>,
}
