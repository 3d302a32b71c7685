//! AMD module form tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The syntactic shape of an AMD `define`/`require` call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmdForm {
    /// `define('name', [deps], factory)`
    Named,
    /// `define([deps], factory)`
    Deps,
    /// `require([deps], callback)`
    Driver,
    /// `define(function () { ... })`
    Factory,
    /// `define(function (require, exports, module) { ... })`
    Rem,
    /// `define({ ... })`
    NoDeps,
    Unknown,
}

impl AmdForm {
    pub const ALL: [AmdForm; 7] = [
        AmdForm::Named,
        AmdForm::Deps,
        AmdForm::Driver,
        AmdForm::Factory,
        AmdForm::Rem,
        AmdForm::NoDeps,
        AmdForm::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AmdForm::Named => "named",
            AmdForm::Deps => "deps",
            AmdForm::Driver => "driver",
            AmdForm::Factory => "factory",
            AmdForm::Rem => "rem",
            AmdForm::NoDeps => "nodeps",
            AmdForm::Unknown => "unknown",
        }
    }

    /// Index of the call argument holding the declared dependency list, for
    /// forms that declare one.
    pub fn deps_argument(self) -> Option<usize> {
        match self {
            AmdForm::Named => Some(1),
            AmdForm::Deps | AmdForm::Driver => Some(0),
            AmdForm::Factory | AmdForm::Rem | AmdForm::NoDeps | AmdForm::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != AmdForm::Unknown
    }
}

impl fmt::Display for AmdForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmdForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AmdForm::ALL
            .into_iter()
            .find(|form| form.as_str() == s)
            .ok_or_else(|| format!("unknown AMD form: {}", s))
    }
}
