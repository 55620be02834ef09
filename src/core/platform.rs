//! Target platforms a file type is meaningful on.

use bitflags::bitflags;
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An operating-system platform an analysis guest can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    /// Serialized as `darwin`, the name the sandbox uses for macOS guests.
    #[serde(rename = "darwin")]
    MacOs,
    Linux,
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Windows,
        Platform::MacOs,
        Platform::Linux,
        Platform::Android,
        Platform::Ios,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "darwin",
            Platform::Linux => "linux",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    fn flag(self) -> PlatformSet {
        match self {
            Platform::Windows => PlatformSet::WINDOWS,
            Platform::MacOs => PlatformSet::MACOS,
            Platform::Linux => PlatformSet::LINUX,
            Platform::Android => PlatformSet::ANDROID,
            Platform::Ios => PlatformSet::IOS,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of platforms. Rule tables reject empty sets at build time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlatformSet: u8 {
        const WINDOWS = 1 << 0;
        const MACOS = 1 << 1;
        const LINUX = 1 << 2;
        const ANDROID = 1 << 3;
        const IOS = 1 << 4;

        const ANY_DESKTOP = Self::WINDOWS.bits() | Self::MACOS.bits() | Self::LINUX.bits();
        const ANY = Self::ANY_DESKTOP.bits() | Self::ANDROID.bits() | Self::IOS.bits();
    }
}

impl PlatformSet {
    /// Member platforms in declaration order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        Platform::ALL
            .into_iter()
            .filter(move |p| self.contains(p.flag()))
    }

    pub fn has(&self, platform: Platform) -> bool {
        self.contains(platform.flag())
    }
}

impl From<Platform> for PlatformSet {
    fn from(platform: Platform) -> Self {
        platform.flag()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<T: IntoIterator<Item = Platform>>(iter: T) -> Self {
        iter.into_iter()
            .fold(PlatformSet::empty(), |acc, p| acc | p.flag())
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.platforms().map(|p| p.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

impl Serialize for PlatformSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.platforms())
    }
}

impl<'de> Deserialize<'de> for PlatformSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = PlatformSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of platform names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = PlatformSet::empty();
                while let Some(p) = seq.next_element::<Platform>()? {
                    set |= p.flag();
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}
