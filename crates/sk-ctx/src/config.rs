/// Run-wide configuration, supplied by the external driver and otherwise
/// opaque to the core except for `indentation_string` and
/// `defaults_to_final`, which the emitter and the `Open` pass consult
/// directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub indentation_string: String,
    pub defaults_to_final: bool,
    pub target_version: String,
    pub toolchain_name: String,
    pub xcode_project_path: Option<String>,
    pub target: Option<String>,
    pub compilation_arguments: CompilationArguments,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indentation_string: "    ".to_string(),
            defaults_to_final: true,
            target_version: String::new(),
            toolchain_name: String::new(),
            xcode_project_path: None,
            target: None,
            compilation_arguments: CompilationArguments::default(),
        }
    }
}

/// Forwarded to the frontend verbatim; never consulted by the core
/// (spec.md §6).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompilationArguments {
    pub absolute_file_paths_and_other_arguments: Vec<String>,
}

impl Config {
    /// Convenience constructor for callers that keep configuration in a
    /// TOML file. The core's required surface is `Config` itself --
    /// loading from disk is purely a driver-side convenience (spec.md §1
    /// keeps build/CLI orchestration out of scope).
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_indentation() {
        let cfg = Config::default();
        assert_eq!(cfg.indentation_string, "    ");
        assert!(cfg.defaults_to_final);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            indentation_string: "\t".to_string(),
            defaults_to_final: false,
            target_version: "1.9".to_string(),
            ..Config::default()
        };
        let s = toml::to_string(&cfg).unwrap();
        let back = Config::from_toml_str(&s).unwrap();
        assert_eq!(cfg, back);
    }
}
