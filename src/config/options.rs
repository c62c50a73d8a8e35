//! Option definitions and the loaded option set.
//!
//! Every configuration option Cairn understands is declared in the static
//! registry here. Loading resolves each definition against the layered
//! property source, records where the value came from, and attaches
//! validation failures instead of failing outright; the boot sequencer
//! decides later whether any failure is fatal.

use std::collections::BTreeMap;

use crate::config::source::{PropertyOrigin, PropertySource};

// Option keys. Grouped here so call sites never spell raw strings.
pub const SOURCE_PATH: &str = "cairn.source.path";
pub const OUTPUT_PATH: &str = "cairn.output.path";
pub const PROJECT_NAME: &str = "cairn.project.name";
pub const PROJECT_VERSION: &str = "cairn.project.version";
pub const SCAN_MODE: &str = "cairn.scan.mode";
pub const REQUIRED_DETECTORS: &str = "cairn.required.detectors";
pub const SERVER_URL: &str = "cairn.server.url";
pub const SERVER_HOST: &str = "cairn.server.host";
pub const SERVER_API_TOKEN: &str = "cairn.server.api.token";
pub const SERVER_TIMEOUT: &str = "cairn.server.timeout";
pub const SERVER_TRUST_CERT: &str = "cairn.server.trust.cert";
pub const OFFLINE_MODE: &str = "cairn.offline.mode";
pub const TEST_CONNECTION: &str = "cairn.test.connection";
pub const DISABLE_WITHOUT_SERVER: &str = "cairn.disable.without.server";
pub const SUPPRESS_CONFIGURATION_OUTPUT: &str = "cairn.suppress.configuration.output";
pub const CLEANUP: &str = "cairn.cleanup";

/// Value shape of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Bool,
    Integer,
    Path,
}

/// Static definition of a known option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDefinition {
    pub key: &'static str,
    pub description: &'static str,
    pub default: &'static str,
    pub kind: OptionKind,
    /// Non-empty means the resolved value must be one of these.
    pub acceptable: &'static [&'static str],
    /// Deprecation note, shown as a warning when the option is set.
    pub deprecated: Option<&'static str>,
    /// Advanced options only appear in verbose help.
    pub advanced: bool,
}

/// The option registry. Keep sorted by key.
pub const DEFINITIONS: &[OptionDefinition] = &[
    OptionDefinition {
        key: CLEANUP,
        description: "Delete run files when the scan completes",
        default: "true",
        kind: OptionKind::Bool,
        acceptable: &[],
        deprecated: None,
        advanced: true,
    },
    OptionDefinition {
        key: DISABLE_WITHOUT_SERVER,
        description: "Exit cleanly instead of scanning when the Cairn server is unreachable",
        default: "false",
        kind: OptionKind::Bool,
        acceptable: &[],
        deprecated: None,
        advanced: true,
    },
    OptionDefinition {
        key: OFFLINE_MODE,
        description: "Run without any Cairn server communication",
        default: "false",
        kind: OptionKind::Bool,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: OUTPUT_PATH,
        description: "Directory where run output is written",
        default: "~/cairn",
        kind: OptionKind::Path,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: PROJECT_NAME,
        description: "Project name reported to the server (defaults to the source directory name)",
        default: "",
        kind: OptionKind::String,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: PROJECT_VERSION,
        description: "Project version reported to the server (defaults to the run id)",
        default: "",
        kind: OptionKind::String,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: REQUIRED_DETECTORS,
        description: "Comma-separated detector types that must apply to the source tree",
        default: "",
        kind: OptionKind::String,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: SCAN_MODE,
        description: "Scan thoroughness",
        default: "full",
        kind: OptionKind::String,
        acceptable: &["full", "rapid"],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: SERVER_API_TOKEN,
        description: "API token for the Cairn server",
        default: "",
        kind: OptionKind::String,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: SERVER_HOST,
        description: "Cairn server host",
        default: "",
        kind: OptionKind::String,
        acceptable: &[],
        deprecated: Some("superseded by cairn.server.url"),
        advanced: true,
    },
    OptionDefinition {
        key: SERVER_TIMEOUT,
        description: "Server request timeout in seconds",
        default: "120",
        kind: OptionKind::Integer,
        acceptable: &[],
        deprecated: None,
        advanced: true,
    },
    OptionDefinition {
        key: SERVER_TRUST_CERT,
        description: "Trust the server certificate without verification",
        default: "false",
        kind: OptionKind::Bool,
        acceptable: &[],
        deprecated: None,
        advanced: true,
    },
    OptionDefinition {
        key: SERVER_URL,
        description: "Base URL of the Cairn server",
        default: "",
        kind: OptionKind::String,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: SOURCE_PATH,
        description: "Path of the project to scan",
        default: ".",
        kind: OptionKind::Path,
        acceptable: &[],
        deprecated: None,
        advanced: false,
    },
    OptionDefinition {
        key: SUPPRESS_CONFIGURATION_OUTPUT,
        description: "Do not print the resolved configuration at startup",
        default: "false",
        kind: OptionKind::Bool,
        acceptable: &[],
        deprecated: None,
        advanced: true,
    },
    OptionDefinition {
        key: TEST_CONNECTION,
        description: "Test the server connection, then exit",
        default: "false",
        kind: OptionKind::Bool,
        acceptable: &[],
        deprecated: None,
        advanced: true,
    },
];

/// A validation failure attached to an option. Presence implies failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Rule identifier.
    pub rule: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// A loaded option: definition plus resolved value, origin, and any
/// validation failures.
#[derive(Debug, Clone)]
pub struct ScanOption {
    pub definition: OptionDefinition,
    pub value: String,
    pub origin: PropertyOrigin,
    pub failures: Vec<ValidationFailure>,
}

impl ScanOption {
    fn validate(&mut self) {
        self.failures.clear();
        match self.definition.kind {
            OptionKind::Bool => {
                if !matches!(self.value.to_ascii_lowercase().as_str(), "true" | "false") {
                    self.failures.push(ValidationFailure {
                        rule: "invalid-boolean",
                        message: format!(
                            "{} must be 'true' or 'false', got '{}'",
                            self.definition.key, self.value
                        ),
                    });
                }
            }
            OptionKind::Integer => {
                if self.value.parse::<i64>().is_err() {
                    self.failures.push(ValidationFailure {
                        rule: "invalid-integer",
                        message: format!(
                            "{} must be an integer, got '{}'",
                            self.definition.key, self.value
                        ),
                    });
                }
            }
            OptionKind::String | OptionKind::Path => {}
        }

        if !self.definition.acceptable.is_empty()
            && !self.definition.acceptable.contains(&self.value.as_str())
        {
            self.failures.push(ValidationFailure {
                rule: "unacceptable-value",
                message: format!(
                    "{} must be one of [{}], got '{}'",
                    self.definition.key,
                    self.definition.acceptable.join(", "),
                    self.value
                ),
            });
        }
    }

    /// Whether this option carries any validation failure.
    pub fn is_invalid(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// The loaded, validated option set.
///
/// Options are keyed by name and kept sorted, so "first invalid option" is
/// deterministic. Mutation happens only through [`ScanOptions::set_value`]
/// (interactive mode, configuration processing) and
/// [`ScanOptions::post_init`].
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    options: BTreeMap<&'static str, ScanOption>,
    warnings: Vec<String>,
}

impl ScanOptions {
    /// Resolve every definition against the property source.
    ///
    /// Never fails: parse problems become per-option validation failures,
    /// deprecated and unknown properties become warnings.
    pub fn load(source: &PropertySource) -> Self {
        let mut options = BTreeMap::new();
        let mut warnings = Vec::new();

        for definition in DEFINITIONS {
            let (value, origin) = match source.get(definition.key) {
                Some((value, origin)) => (value.to_string(), origin),
                None => (definition.default.to_string(), PropertyOrigin::Default),
            };

            if origin != PropertyOrigin::Default {
                if let Some(note) = definition.deprecated {
                    warnings.push(format!("{} is deprecated: {}", definition.key, note));
                }
            }

            let mut option = ScanOption {
                definition: *definition,
                value,
                origin,
                failures: Vec::new(),
            };
            option.validate();
            options.insert(definition.key, option);
        }

        for key in source.keys() {
            if key.starts_with("cairn.") && !options.contains_key(key.as_str()) {
                warnings.push(format!("unknown property '{}' was ignored", key));
            }
        }

        let mut loaded = Self { options, warnings };
        loaded.adopt_deprecated_server_host();
        loaded
    }

    /// Honor the deprecated `cairn.server.host` alias when `cairn.server.url`
    /// was not set explicitly.
    fn adopt_deprecated_server_host(&mut self) {
        let host = self.option(SERVER_HOST);
        if host.origin == PropertyOrigin::Default || host.value.is_empty() {
            return;
        }
        let (host_value, host_origin) = (host.value.clone(), host.origin);
        let url_is_default = self.option(SERVER_URL).origin == PropertyOrigin::Default;
        if url_is_default {
            self.set_value(SERVER_URL, &host_value, host_origin);
        }
    }

    fn option(&self, key: &str) -> &ScanOption {
        self.options
            .get(key)
            .unwrap_or_else(|| panic!("unknown option key '{}'", key))
    }

    /// Resolved string value of a known option.
    pub fn value(&self, key: &str) -> &str {
        &self.option(key).value
    }

    /// Origin of a known option's value.
    pub fn origin(&self, key: &str) -> PropertyOrigin {
        self.option(key).origin
    }

    /// Resolved boolean value; a value that failed validation reads as the
    /// parsed default.
    pub fn bool_value(&self, key: &str) -> bool {
        let option = self.option(key);
        match option.value.to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => option.definition.default == "true",
        }
    }

    /// Resolved integer value; a value that failed validation reads as the
    /// parsed default.
    pub fn int_value(&self, key: &str) -> i64 {
        let option = self.option(key);
        option
            .value
            .parse()
            .or_else(|_| option.definition.default.parse())
            .unwrap_or(0)
    }

    /// Overwrite an option's value. Only interactive editing and
    /// configuration processing call this.
    pub fn set_value(&mut self, key: &str, value: &str, origin: PropertyOrigin) {
        let option = self
            .options
            .get_mut(key)
            .unwrap_or_else(|| panic!("unknown option key '{}'", key));
        option.value = value.to_string();
        option.origin = origin;
        option.validate();
    }

    /// Re-run validation against fully-resolved values.
    ///
    /// Interactive editing and configuration processing may have replaced
    /// values since load; deferred validation settles the final verdict.
    pub fn post_init(&mut self) {
        for option in self.options.values_mut() {
            option.validate();
        }
    }

    /// The first invalid option's first failure, in key order.
    pub fn first_invalid(&self) -> Option<&ValidationFailure> {
        self.options
            .values()
            .find(|option| option.is_invalid())
            .and_then(|option| option.failures.first())
    }

    /// Accumulated load warnings (deprecations, unknown properties).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Iterate options in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ScanOption> {
        self.options.values()
    }
}
