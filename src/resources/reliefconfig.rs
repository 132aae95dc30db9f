//! Plugin configuration.
//!
//! [`ReliefConfig`] holds the raw values read from an INI file, starting from
//! safe defaults. [`ReliefConfig::validate`] checks them against the host's
//! materials and color support and produces the immutable [`ReliefSettings`]
//! resource the systems run on. Without a `ReliefSettings` resource in the
//! world the whole feature set stays disabled.
//!
//! # Configuration File Format
//!
//! ```ini
//! [cooldowns]
//! pee = 60
//! poo = 120
//!
//! [items.pee]
//! material = YELLOW_DYE
//! duration = 5
//! velocity = 0.5
//!
//! [items.poo]
//! material = BROWN_DYE
//! duration = 5
//!
//! [messages]
//! pee-command = &eAaah...
//! cooldown = &cYou need to wait %time% seconds before using this command again!
//! ```
//!
//! Only `;` starts a comment, so `#RRGGBB` colors can be written as-is.

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::components::emissionjob::EmissionProfile;
use crate::error::ConfigError;
use crate::kind::ReliefKind;
use crate::resources::chatformat::{ChatFormatter, ColorSupport, contains_hex};
use crate::resources::materials::{Material, MaterialRegistry};

/// Default safe values for startup
const DEFAULT_PEE_COOLDOWN: i64 = 60;
const DEFAULT_POO_COOLDOWN: i64 = 120;
const DEFAULT_DURATION: i64 = 5;
const DEFAULT_PEE_VELOCITY: f64 = 0.5;
const DEFAULT_PRUNE_INTERVAL: i64 = 0;
const DEFAULT_ONLY_PLAYERS: &str = "&cOnly players can use this command!";
const DEFAULT_COOLDOWN: &str = "&cYou need to wait %time% seconds before using this command again!";
const DEFAULT_BUSY: &str = "&cYou are already busy with that!";
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Config file written on first run.
pub const DEFAULT_CONFIG: &str = "\
; Cooldowns in seconds per command.
[cooldowns]
pee = 60
poo = 120
; Seconds between sweeps of expired cooldown entries. 0 never sweeps.
prune-interval = 0

[items.pee]
material = YELLOW_DYE
duration = 5
velocity = 0.5

[items.poo]
material = BROWN_DYE
duration = 5

; What to do when a command is used again while its emission still runs:
; allow (start another one) or reject.
[jobs]
overlap = allow

; '&' color codes work everywhere, #RRGGBB hex colors need 1.16 or newer.
[messages]
pee-command = &eAaah... that feels better.
poo-command = &6Phew! Don't step in it.
only-players = &cOnly players can use this command!
cooldown = &cYou need to wait %time% seconds before using this command again!
busy = &cYou are already busy with that!
";

/// What happens when an actor activates a kind whose previous job still runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Start another job next to the running one.
    #[default]
    Allow,
    /// Answer with the `busy` message; the cooldown is not recorded.
    Reject,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(OverlapPolicy::Allow),
            "reject" => Ok(OverlapPolicy::Reject),
            other => Err(format!("expected 'allow' or 'reject', got '{}'", other)),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::Allow => f.write_str("allow"),
            OverlapPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// Raw configuration values as read from the file.
#[derive(Debug, Clone)]
pub struct ReliefConfig {
    pub pee_cooldown: i64,
    pub poo_cooldown: i64,
    pub prune_interval: i64,
    pub pee_material: Option<String>,
    pub pee_duration: i64,
    pub pee_velocity: f64,
    pub poo_material: Option<String>,
    pub poo_duration: i64,
    pub overlap: String,
    pub pee_command: Option<String>,
    pub poo_command: Option<String>,
    pub only_players: String,
    pub cooldown_message: String,
    pub busy_message: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReliefConfig {
    /// Create a configuration with default values and no materials or command messages.
    pub fn new() -> Self {
        Self {
            pee_cooldown: DEFAULT_PEE_COOLDOWN,
            poo_cooldown: DEFAULT_POO_COOLDOWN,
            prune_interval: DEFAULT_PRUNE_INTERVAL,
            pee_material: None,
            pee_duration: DEFAULT_DURATION,
            pee_velocity: DEFAULT_PEE_VELOCITY,
            poo_material: None,
            poo_duration: DEFAULT_DURATION,
            overlap: OverlapPolicy::default().to_string(),
            pee_command: None,
            poo_command: None,
            only_players: DEFAULT_ONLY_PLAYERS.to_string(),
            cooldown_message: DEFAULT_COOLDOWN.to_string(),
            busy_message: DEFAULT_BUSY.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Parse configuration text instead of a file.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let mut ini = new_ini();
        ini.read(text.to_string()).map_err(ConfigError::Load)?;
        let mut config = Self::new();
        config.apply(&ini)?;
        Ok(config)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = new_ini();
        ini.load(&self.config_path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", self.config_path.display(), e)))?;
        self.apply(&ini)?;

        info!(
            "Loaded config: cooldowns pee={}s poo={}s, materials pee={:?} poo={:?}, durations pee={}s poo={}s, overlap={}",
            self.pee_cooldown,
            self.poo_cooldown,
            self.pee_material,
            self.poo_material,
            self.pee_duration,
            self.poo_duration,
            self.overlap
        );
        Ok(())
    }

    /// Write the commented default configuration to `path`.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Save(e.to_string()))?;
        }
        std::fs::write(path, DEFAULT_CONFIG).map_err(|e| ConfigError::Save(e.to_string()))?;
        info!("Saved default config to {:?}", path);
        Ok(())
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [cooldowns] section
        if let Some(v) = get_int(ini, "cooldowns", "pee")? {
            self.pee_cooldown = v;
        }
        if let Some(v) = get_int(ini, "cooldowns", "poo")? {
            self.poo_cooldown = v;
        }
        if let Some(v) = get_int(ini, "cooldowns", "prune-interval")? {
            self.prune_interval = v;
        }

        // [items.*] sections
        if let Some(v) = ini.get("items.pee", "material") {
            self.pee_material = Some(v);
        }
        if let Some(v) = get_int(ini, "items.pee", "duration")? {
            self.pee_duration = v;
        }
        if let Some(v) = ini
            .getfloat("items.pee", "velocity")
            .map_err(|reason| invalid("items.pee.velocity", reason))?
        {
            self.pee_velocity = v;
        }
        if let Some(v) = ini.get("items.poo", "material") {
            self.poo_material = Some(v);
        }
        if let Some(v) = get_int(ini, "items.poo", "duration")? {
            self.poo_duration = v;
        }

        // [jobs] section
        if let Some(v) = ini.get("jobs", "overlap") {
            self.overlap = v;
        }

        // [messages] section
        if let Some(v) = ini.get("messages", "pee-command") {
            self.pee_command = Some(v);
        }
        if let Some(v) = ini.get("messages", "poo-command") {
            self.poo_command = Some(v);
        }
        if let Some(v) = ini.get("messages", "only-players") {
            self.only_players = v;
        }
        if let Some(v) = ini.get("messages", "cooldown") {
            self.cooldown_message = v;
        }
        if let Some(v) = ini.get("messages", "busy") {
            self.busy_message = v;
        }
        Ok(())
    }

    fn messages(&self) -> impl Iterator<Item = &str> {
        [
            self.pee_command.as_deref(),
            self.poo_command.as_deref(),
            Some(self.only_players.as_str()),
            Some(self.cooldown_message.as_str()),
            Some(self.busy_message.as_str()),
        ]
        .into_iter()
        .flatten()
    }

    /// Check every value and build the runtime settings.
    ///
    /// `host` is only used in error messages.
    pub fn validate(
        &self,
        registry: &MaterialRegistry,
        support: ColorSupport,
        host: &str,
    ) -> Result<ReliefSettings, ConfigError> {
        if !support.supports_hex() && self.messages().any(contains_hex) {
            return Err(ConfigError::HexColorsUnsupported(host.to_string()));
        }

        let pee_material = resolve_material(registry, ReliefKind::Pee, &self.pee_material, host)?;
        let poo_material = resolve_material(registry, ReliefKind::Poo, &self.poo_material, host)?;

        let pee_command = self
            .pee_command
            .clone()
            .ok_or(ConfigError::MissingMessage("pee-command"))?;
        let poo_command = self
            .poo_command
            .clone()
            .ok_or(ConfigError::MissingMessage("poo-command"))?;

        int_seconds("cooldowns.pee", self.pee_cooldown)?;
        int_seconds("cooldowns.poo", self.poo_cooldown)?;
        int_seconds("cooldowns.prune-interval", self.prune_interval)?;
        int_seconds("items.pee.duration", self.pee_duration)?;
        int_seconds("items.poo.duration", self.poo_duration)?;
        if !self.pee_velocity.is_finite() {
            return Err(invalid("items.pee.velocity", "must be a finite number"));
        }
        let overlap = self
            .overlap
            .parse::<OverlapPolicy>()
            .map_err(|reason| invalid("jobs.overlap", reason))?;

        info!("Successfully set pee material to: {}", pee_material);
        info!("Successfully set poo material to: {}", poo_material);

        Ok(ReliefSettings {
            pee: KindSettings {
                cooldown_seconds: self.pee_cooldown,
                material: pee_material,
                duration_seconds: self.pee_duration,
                profile: EmissionProfile::pee(self.pee_velocity as f32),
                activation_message: pee_command,
            },
            poo: KindSettings {
                cooldown_seconds: self.poo_cooldown,
                material: poo_material,
                duration_seconds: self.poo_duration,
                profile: EmissionProfile::poo(),
                activation_message: poo_command,
            },
            overlap,
            prune_interval_seconds: self.prune_interval,
            only_players_message: self.only_players.clone(),
            cooldown_message: self.cooldown_message.clone(),
            busy_message: self.busy_message.clone(),
            formatter: ChatFormatter::new(support),
        })
    }
}

fn new_ini() -> Ini {
    let mut ini = Ini::new();
    ini.set_comment_symbols(&[';']);
    ini
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn get_int(ini: &Ini, section: &str, key: &str) -> Result<Option<i64>, ConfigError> {
    ini.getint(section, key)
        .map_err(|reason| invalid(&format!("{}.{}", section, key), reason))
}

/// Second counts are plain ints: `0..=i32::MAX`.
fn int_seconds(key: &str, value: i64) -> Result<(), ConfigError> {
    if value < 0 {
        return Err(invalid(key, format!("must not be negative, got {}", value)));
    }
    if value > i64::from(i32::MAX) {
        return Err(invalid(
            key,
            format!("must be at most {}, got {}", i32::MAX, value),
        ));
    }
    Ok(())
}

fn resolve_material(
    registry: &MaterialRegistry,
    kind: ReliefKind,
    name: &Option<String>,
    host: &str,
) -> Result<Material, ConfigError> {
    let name = match name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ConfigError::MissingMaterial { kind: kind.name() }),
    };
    registry
        .resolve(name)
        .ok_or_else(|| ConfigError::UnknownMaterial {
            name: name.to_string(),
            host: host.to_string(),
        })
}

/// Validated settings for one kind.
#[derive(Debug, Clone)]
pub struct KindSettings {
    pub cooldown_seconds: i64,
    pub material: Material,
    pub duration_seconds: i64,
    pub profile: EmissionProfile,
    /// Sent to the actor on a successful activation (unformatted).
    pub activation_message: String,
}

/// Validated, immutable settings. Present in the world only when enabled.
#[derive(Resource, Debug, Clone)]
pub struct ReliefSettings {
    pub pee: KindSettings,
    pub poo: KindSettings,
    pub overlap: OverlapPolicy,
    pub prune_interval_seconds: i64,
    pub only_players_message: String,
    pub cooldown_message: String,
    pub busy_message: String,
    pub formatter: ChatFormatter,
}

impl ReliefSettings {
    pub fn kind(&self, kind: ReliefKind) -> &KindSettings {
        match kind {
            ReliefKind::Pee => &self.pee,
            ReliefKind::Poo => &self.poo,
        }
    }

    /// Whether `material` is one of the configured item materials.
    pub fn is_relief_material(&self, material: &Material) -> bool {
        *material == self.pee.material || *material == self.poo.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "1.20.4-R0.1-SNAPSHOT";

    fn validate(text: &str, support: ColorSupport) -> Result<ReliefSettings, ConfigError> {
        ReliefConfig::from_ini_str(text)?.validate(&MaterialRegistry::with_defaults(), support, HOST)
    }

    #[test]
    fn test_default_config_is_valid() {
        let settings = validate(DEFAULT_CONFIG, ColorSupport::Hex).unwrap();
        assert_eq!(settings.pee.cooldown_seconds, 60);
        assert_eq!(settings.poo.cooldown_seconds, 120);
        assert_eq!(settings.pee.material.name(), "YELLOW_DYE");
        assert_eq!(settings.poo.material.name(), "BROWN_DYE");
        assert_eq!(settings.pee.duration_seconds, 5);
        assert_eq!(settings.overlap, OverlapPolicy::Allow);
        assert_eq!(settings.prune_interval_seconds, 0);
        assert_eq!(settings.pee.profile, EmissionProfile::pee(0.5));
    }

    #[test]
    fn test_defaults_apply_for_missing_keys() {
        let text = "\
[items.pee]
material = gold_nugget
[items.poo]
material = cocoa_beans
[messages]
pee-command = a
poo-command = b
";
        let settings = validate(text, ColorSupport::Standard).unwrap();
        assert_eq!(settings.pee.cooldown_seconds, 60);
        assert_eq!(settings.poo.cooldown_seconds, 120);
        assert_eq!(settings.poo.duration_seconds, 5);
        assert_eq!(settings.pee.material.name(), "GOLD_NUGGET");
        assert_eq!(settings.cooldown_message, DEFAULT_COOLDOWN);
        assert!(settings.is_relief_material(&Material::new("COCOA_BEANS")));
        assert!(!settings.is_relief_material(&Material::new("STONE")));
    }

    #[test]
    fn test_hex_kept_as_value_not_comment() {
        let text = DEFAULT_CONFIG.replace("pee-command = &e", "pee-command = #FFAA00");
        let config = ReliefConfig::from_ini_str(&text).unwrap();
        assert_eq!(
            config.pee_command.as_deref(),
            Some("#FFAA00Aaah... that feels better.")
        );
    }

    #[test]
    fn test_hex_rejected_without_support() {
        let text = DEFAULT_CONFIG.replace("busy = &c", "busy = #FF0000");
        assert!(matches!(
            validate(&text, ColorSupport::Standard),
            Err(ConfigError::HexColorsUnsupported(_))
        ));
        assert!(validate(&text, ColorSupport::Hex).is_ok());
    }

    #[test]
    fn test_missing_material() {
        let text = DEFAULT_CONFIG.replace("material = BROWN_DYE", "material =");
        assert!(matches!(
            validate(&text, ColorSupport::Hex),
            Err(ConfigError::MissingMaterial { kind: "poo" })
        ));
    }

    #[test]
    fn test_unknown_material() {
        let text = DEFAULT_CONFIG.replace("YELLOW_DYE", "UNOBTAINIUM");
        match validate(&text, ColorSupport::Hex) {
            Err(ConfigError::UnknownMaterial { name, host }) => {
                assert_eq!(name, "UNOBTAINIUM");
                assert_eq!(host, HOST);
            }
            other => panic!("expected UnknownMaterial, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_command_message() {
        let text = DEFAULT_CONFIG.replace("poo-command", "poo-commnad");
        assert!(matches!(
            validate(&text, ColorSupport::Hex),
            Err(ConfigError::MissingMessage("poo-command"))
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        let text = DEFAULT_CONFIG.replace("pee = 60", "pee = sixty");
        assert!(matches!(
            ReliefConfig::from_ini_str(&text),
            Err(ConfigError::InvalidValue { .. })
        ));
        let text = DEFAULT_CONFIG.replace("poo = 120", "poo = -1");
        assert!(matches!(
            validate(&text, ColorSupport::Hex),
            Err(ConfigError::InvalidValue { .. })
        ));
        let text = DEFAULT_CONFIG.replace("overlap = allow", "overlap = merge");
        assert!(matches!(
            validate(&text, ColorSupport::Hex),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_seconds_limited_to_int_range() {
        let max = i32::MAX.to_string();
        let text = DEFAULT_CONFIG.replace("pee = 60", &format!("pee = {}", max));
        assert_eq!(
            validate(&text, ColorSupport::Hex).unwrap().pee.cooldown_seconds,
            i64::from(i32::MAX)
        );

        for (from, key) in [
            ("pee = 60", "cooldowns.pee"),
            ("poo = 120", "cooldowns.poo"),
            ("prune-interval = 0", "cooldowns.prune-interval"),
            ("duration = 5", "items.pee.duration"),
        ] {
            let to = format!("{} = 9223372036854775807", from.split(" = ").next().unwrap());
            let text = DEFAULT_CONFIG.replacen(from, &to, 1);
            match validate(&text, ColorSupport::Hex) {
                Err(ConfigError::InvalidValue { key: k, .. }) => assert_eq!(k, key),
                other => panic!("{} accepted: {:?}", key, other.map(|_| ())),
            }
        }

        let text = DEFAULT_CONFIG.replace(
            "[items.poo]\nmaterial = BROWN_DYE\nduration = 5",
            "[items.poo]\nmaterial = BROWN_DYE\nduration = 2147483648",
        );
        assert!(matches!(
            validate(&text, ColorSupport::Hex),
            Err(ConfigError::InvalidValue { key, .. }) if key == "items.poo.duration"
        ));
    }

    #[test]
    fn test_overlap_reject() {
        let text = DEFAULT_CONFIG.replace("overlap = allow", "overlap = REJECT");
        assert_eq!(
            validate(&text, ColorSupport::Hex).unwrap().overlap,
            OverlapPolicy::Reject
        );
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");
        ReliefConfig::write_default(&path).unwrap();

        let mut config = ReliefConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.pee_material.as_deref(), Some("YELLOW_DYE"));
        assert_eq!(config.poo_duration, 5);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ReliefConfig::with_path(dir.path().join("absent.ini"));
        assert!(matches!(config.load_from_file(), Err(ConfigError::Load(_))));
    }
}
