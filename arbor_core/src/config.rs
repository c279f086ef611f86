// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration.

use core::fmt;
use core::str::FromStr;

/// How a [`Transform`](crate::transform::Transform) keeps its matrices current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformMode {
    /// Setters only bump a version; the local matrix is rebuilt lazily on the
    /// next update, and only when that version moved.
    #[default]
    Static,
    /// Setters rebuild the local matrix (and the world matrix, once a parent
    /// frame has been seen) immediately.
    Dynamic,
}

impl TransformMode {
    /// The lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            _ => Err(ConfigError::UnknownTransformMode),
        }
    }
}

/// Options fixed at [`SceneGraph`](crate::scene::SceneGraph) construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneConfig {
    /// Transform strategy given to every node the scene creates.
    pub transform_mode: TransformMode,
}

impl SceneConfig {
    /// Returns a config with the given transform mode.
    #[must_use]
    pub const fn with_transform_mode(mut self, mode: TransformMode) -> Self {
        self.transform_mode = mode;
        self
    }
}

/// Errors produced while parsing configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The string was neither `static` nor `dynamic`.
    UnknownTransformMode,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTransformMode => {
                f.write_str("unknown transform mode (expected `static` or `dynamic`)")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_modes() {
        assert_eq!("static".parse(), Ok(TransformMode::Static), "static");
        assert_eq!("dynamic".parse(), Ok(TransformMode::Dynamic), "dynamic");
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "Static".parse::<TransformMode>(),
            Err(ConfigError::UnknownTransformMode),
            "names are case-sensitive"
        );
        assert_eq!(
            "".parse::<TransformMode>(),
            Err(ConfigError::UnknownTransformMode),
            "empty"
        );
    }

    #[test]
    fn default_is_static() {
        assert_eq!(
            SceneConfig::default().transform_mode,
            TransformMode::Static,
            "default mode"
        );
        let cfg = SceneConfig::default().with_transform_mode(TransformMode::Dynamic);
        assert_eq!(cfg.transform_mode, TransformMode::Dynamic, "builder");
    }

    #[test]
    fn display_round_trips() {
        for mode in [TransformMode::Static, TransformMode::Dynamic] {
            assert_eq!(mode.as_str().parse(), Ok(mode), "{mode}");
        }
    }
}
