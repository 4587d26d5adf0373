//! Demonstration schema resolved by every command.
//!
//! Two mod ids are registered:
//! - `demo`, with a client config (made main) and a `demo:server` branch
//! - `extras`, with a single config that is main implicitly
//!
//! The client config carries a custom `Rgb` type handled by an extension
//! transformation.

use confgraph::schema::{ConfigContainer, Group, Schema};
use confgraph::transform::Transformation;
use confgraph::{
    share, Config, ConfigRegistry, ConfigValue, DataExtension, Entry, Error, Result, Shared, Value,
    ValueKind, ValueType,
};

/// Rendering quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Fastest rendering.
    Low,
    /// Balanced.
    #[default]
    Medium,
    /// Best looking.
    High,
}

impl ConfigValue for Quality {
    fn value_type() -> ValueType {
        ValueType::enumeration::<Self>(&["low", "medium", "high"])
    }

    fn to_value(&self) -> Value {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        Value::Text(name.to_string())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value.as_text() {
            Some("low") => Ok(Self::Low),
            Some("medium") => Ok(Self::Medium),
            Some("high") => Ok(Self::High),
            _ => Err(Error::Coercion {
                expected: "Quality",
                found: value.to_string(),
            }),
        }
    }
}

/// A 24-bit color. No built-in transformation knows this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u32);

impl ConfigValue for Rgb {
    fn value_type() -> ValueType {
        ValueType::of::<Self>(ValueKind::Custom)
    }

    fn to_value(&self) -> Value {
        Value::Integer(i64::from(self.0))
    }

    fn from_value(value: Value) -> Result<Self> {
        u32::from_value(value).map(Rgb)
    }
}

/// Turns [`Rgb`] fields into color entries.
pub struct ColorExtension;

impl DataExtension for ColorExtension {
    fn transformations(&self) -> Vec<Transformation> {
        vec![Transformation::filter()
            .by_type::<Rgb>()
            .transform(|origin| Entry::color(origin, false))]
    }
}

/// Top-level client options.
pub struct Client {
    pub enabled: bool,
    pub nickname: String,
    pub video: Shared<Video>,
    pub audio: Shared<Audio>,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            enabled: true,
            nickname: "player".to_string(),
            video: share(Video::default()),
            audio: share(Audio::default()),
        }
    }
}

impl ConfigContainer for Client {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("enabled", |c| &c.enabled, |c| &mut c.enabled)
            .comment("Turns the client features on");
        schema
            .entry("nickname", |c| &c.nickname, |c| &mut c.nickname)
            .translation_key("demo.client.nickname");
        schema.transitive("video", |c| &c.video);
        schema.transitive("audio", |c| &c.audio);
        schema.nested::<Hud>().transitive();
    }
}

/// Rendering options.
pub struct Video {
    pub fov: u8,
    pub quality: Quality,
    pub vsync: bool,
    pub max_fps: u16,
}

impl Default for Video {
    fn default() -> Self {
        Self {
            fov: 70,
            quality: Quality::default(),
            vsync: true,
            max_fps: 144,
        }
    }
}

impl ConfigContainer for Video {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema
            .field("fov", |v| &v.fov, |v| &mut v.fov)
            .slider(30, 110, 5)
            .formatter(|fov| format!("{fov} deg"));
        schema
            .field("quality", |v| &v.quality, |v| &mut v.quality)
            .dropdown();
        schema.field("vsync", |v| &v.vsync, |v| &mut v.vsync).checkbox();
        schema
            .field("max_fps", |v| &v.max_fps, |v| &mut v.max_fps)
            .bounded(30, 240)
            .requires_restart();
    }

    fn group(&self) -> Option<Group> {
        Some(Group::new("video").with_description("Rendering options"))
    }
}

/// Sound options.
pub struct Audio {
    pub volume: u8,
    pub muted: bool,
}

impl Default for Audio {
    fn default() -> Self {
        Self {
            volume: 80,
            muted: false,
        }
    }
}

impl ConfigContainer for Audio {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("volume", |a| &a.volume, |a| &mut a.volume)
            .bounded(0, 100)
            .comment("Master volume in percent");
        schema.entry("muted", |a| &a.muted, |a| &mut a.muted);
    }

    fn group(&self) -> Option<Group> {
        Some(Group::new("audio"))
    }
}

/// Overlay options, declared as a nested class of [`Client`].
pub struct Hud {
    pub crosshair: Rgb,
    pub scale: f64,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            crosshair: Rgb(0x00FF_FFFF),
            scale: 1.0,
        }
    }
}

impl ConfigContainer for Hud {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("crosshair", |h| &h.crosshair, |h| &mut h.crosshair)
            .comment("Crosshair color as 0xRRGGBB");
        schema
            .entry("scale", |h| &h.scale, |h| &mut h.scale)
            .bounded(0.5, 2.0);
    }

    fn group(&self) -> Option<Group> {
        Some(Group::new("hud").with_description("Overlay options"))
    }
}

/// Dedicated server options.
pub struct Server {
    pub port: u16,
    pub motd: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            port: 25565,
            motd: "Welcome".to_string(),
        }
    }
}

impl ConfigContainer for Server {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("port", |s| &s.port, |s| &mut s.port)
            .bounded(1024, 65535)
            .requires_restart();
        schema.entry("motd", |s| &s.motd, |s| &mut s.motd);
    }
}

/// Optional features of a second mod.
#[derive(Default)]
pub struct Extras {
    pub tips: bool,
}

impl ConfigContainer for Extras {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema.field("tips", |e| &e.tips, |e| &mut e.tips);
    }
}

/// The resolved demonstration registry and its configs.
pub struct Demo {
    pub registry: ConfigRegistry,
    pub configs: Vec<Config>,
}

impl Demo {
    /// Builds the registry and resolves every demo config.
    pub fn build() -> Result<Self> {
        let mut registry = ConfigRegistry::builder().extension(ColorExtension).build();

        let client = Config::builder("demo")
            .description("Client settings")
            .add(Client::default())
            .build(&mut registry)?;
        let server = Config::builder("demo")
            .with_branch(["server"])
            .description("Dedicated server settings")
            .add(Server::default())
            .build(&mut registry)?;
        client.make_main(&mut registry);
        let extras = Config::builder("extras").add(Extras::default()).build(&mut registry)?;

        Ok(Self {
            registry,
            configs: vec![client, server, extras],
        })
    }

    /// Finds a config by its key (`demo`, `demo:server`, ...).
    pub fn config(&self, key: &str) -> Option<&Config> {
        self.configs.iter().find(|c| c.key().to_string() == key)
    }
}
