use std::fmt;
use std::str::FromStr;

use crate::{Error, Nevra};

/// The string forms a [`Nevra`] can be rendered in.
///
/// The letters name the fields that are included, in order: `n`ame, `e`poch, `v`ersion,
/// `r`elease and `a`rch. The epoch is always rendered (an absent epoch as `0`), except by the
/// `Ui*` forms which leave it out whenever it displays as `0`.
///
/// | Form      | Example                       |
/// |-----------|-------------------------------|
/// | `Na`      | `foo.x86_64`                  |
/// | `Nv`      | `foo-1.0`                     |
/// | `Vr`      | `1.0-2`                       |
/// | `Vra`     | `1.0-2.x86_64`                |
/// | `Nvr`     | `foo-1.0-2`                   |
/// | `Nvra`    | `foo-1.0-2.x86_64`            |
/// | `Evr`     | `3:1.0-2`                     |
/// | `Evra`    | `3:1.0-2.x86_64`              |
/// | `Envr`    | `3:foo-1.0-2`                 |
/// | `Envra`   | `3:foo-1.0-2.x86_64`          |
/// | `Nevr`    | `foo-3:1.0-2`                 |
/// | `Nevra`   | `foo-3:1.0-2.x86_64`          |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NevraFormat {
    Na,
    Nv,
    Vr,
    Vra,
    Nvr,
    Nvra,
    Evr,
    Evra,
    Envr,
    Envra,
    Nevr,
    Nevra,
    UiEvr,
    UiEvra,
    UiEnvr,
    UiEnvra,
    UiNevr,
    UiNevra,
}

impl NevraFormat {
    pub const ALL: [NevraFormat; 18] = [
        NevraFormat::Na,
        NevraFormat::Nv,
        NevraFormat::Vr,
        NevraFormat::Vra,
        NevraFormat::Nvr,
        NevraFormat::Nvra,
        NevraFormat::Evr,
        NevraFormat::Evra,
        NevraFormat::Envr,
        NevraFormat::Envra,
        NevraFormat::Nevr,
        NevraFormat::Nevra,
        NevraFormat::UiEvr,
        NevraFormat::UiEvra,
        NevraFormat::UiEnvr,
        NevraFormat::UiEnvra,
        NevraFormat::UiNevr,
        NevraFormat::UiNevra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NevraFormat::Na => "na",
            NevraFormat::Nv => "nv",
            NevraFormat::Vr => "vr",
            NevraFormat::Vra => "vra",
            NevraFormat::Nvr => "nvr",
            NevraFormat::Nvra => "nvra",
            NevraFormat::Evr => "evr",
            NevraFormat::Evra => "evra",
            NevraFormat::Envr => "envr",
            NevraFormat::Envra => "envra",
            NevraFormat::Nevr => "nevr",
            NevraFormat::Nevra => "nevra",
            NevraFormat::UiEvr => "ui_evr",
            NevraFormat::UiEvra => "ui_evra",
            NevraFormat::UiEnvr => "ui_envr",
            NevraFormat::UiEnvra => "ui_envra",
            NevraFormat::UiNevr => "ui_nevr",
            NevraFormat::UiNevra => "ui_nevra",
        }
    }

    /// The form a `Ui*` form stands for, depending on whether the epoch is shown
    fn resolve(self, show_epoch: bool) -> NevraFormat {
        match (self, show_epoch) {
            (NevraFormat::UiEvr, false) => NevraFormat::Vr,
            (NevraFormat::UiEvra, false) => NevraFormat::Vra,
            (NevraFormat::UiEnvr | NevraFormat::UiNevr, false) => NevraFormat::Nvr,
            (NevraFormat::UiEnvra | NevraFormat::UiNevra, false) => NevraFormat::Nvra,
            (NevraFormat::UiEvr, true) => NevraFormat::Evr,
            (NevraFormat::UiEvra, true) => NevraFormat::Evra,
            (NevraFormat::UiEnvr, true) => NevraFormat::Envr,
            (NevraFormat::UiEnvra, true) => NevraFormat::Envra,
            (NevraFormat::UiNevr, true) => NevraFormat::Nevr,
            (NevraFormat::UiNevra, true) => NevraFormat::Nevra,
            (other, _) => other,
        }
    }

    pub(crate) fn render(self, nevra: &Nevra<'_>) -> String {
        let (name, epoch, version, release, arch) = nevra.values();

        match self.resolve(!nevra.epoch().is_zero()) {
            NevraFormat::Na => format!("{name}.{arch}"),
            NevraFormat::Nv => format!("{name}-{version}"),
            NevraFormat::Vr => format!("{version}-{release}"),
            NevraFormat::Vra => format!("{version}-{release}.{arch}"),
            NevraFormat::Nvr => format!("{name}-{version}-{release}"),
            NevraFormat::Nvra => format!("{name}-{version}-{release}.{arch}"),
            NevraFormat::Evr => format!("{epoch}:{version}-{release}"),
            NevraFormat::Evra => format!("{epoch}:{version}-{release}.{arch}"),
            NevraFormat::Envr => format!("{epoch}:{name}-{version}-{release}"),
            NevraFormat::Envra => format!("{epoch}:{name}-{version}-{release}.{arch}"),
            // resolve() never returns a Ui form
            NevraFormat::Nevr
            | NevraFormat::UiEvr
            | NevraFormat::UiEnvr
            | NevraFormat::UiNevr => format!("{name}-{epoch}:{version}-{release}"),
            NevraFormat::Nevra
            | NevraFormat::UiEvra
            | NevraFormat::UiEnvra
            | NevraFormat::UiNevra => format!("{name}-{epoch}:{version}-{release}.{arch}"),
        }
    }
}

impl fmt::Display for NevraFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NevraFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NevraFormat::ALL
            .into_iter()
            .find(|form| form.as_str() == s)
            .ok_or_else(|| Error::malformed(s, "unknown package identifier form"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NevraFormat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NevraFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let form = <String as serde::Deserialize>::deserialize(deserializer)?;
        form.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Epoch;

    #[test]
    fn test_all_forms() {
        let nevra = Nevra::new("foo", "3", "1.0", "2", "x86_64").unwrap();
        let expected = [
            "foo.x86_64",
            "foo-1.0",
            "1.0-2",
            "1.0-2.x86_64",
            "foo-1.0-2",
            "foo-1.0-2.x86_64",
            "3:1.0-2",
            "3:1.0-2.x86_64",
            "3:foo-1.0-2",
            "3:foo-1.0-2.x86_64",
            "foo-3:1.0-2",
            "foo-3:1.0-2.x86_64",
            "3:1.0-2",
            "3:1.0-2.x86_64",
            "3:foo-1.0-2",
            "3:foo-1.0-2.x86_64",
            "foo-3:1.0-2",
            "foo-3:1.0-2.x86_64",
        ];
        for (form, expected) in NevraFormat::ALL.into_iter().zip(expected) {
            assert_eq!(nevra.format(form), expected, "{form}");
        }
    }

    #[test]
    fn test_ui_forms_hide_zero_epoch() {
        for epoch in [Epoch::Absent, Epoch::from("0")] {
            let nevra = Nevra::new("foo", epoch, "1.0", "2", "noarch").unwrap();
            assert_eq!(nevra.format(NevraFormat::UiEvr), "1.0-2");
            assert_eq!(nevra.format(NevraFormat::UiEvra), "1.0-2.noarch");
            assert_eq!(nevra.format(NevraFormat::UiEnvr), "foo-1.0-2");
            assert_eq!(nevra.format(NevraFormat::UiEnvra), "foo-1.0-2.noarch");
            assert_eq!(nevra.format(NevraFormat::UiNevr), "foo-1.0-2");
            assert_eq!(nevra.format(NevraFormat::UiNevra), "foo-1.0-2.noarch");
            assert_eq!(nevra.format(NevraFormat::Evr), "0:1.0-2");
            assert_eq!(nevra.format(NevraFormat::Envra), "0:foo-1.0-2.noarch");
        }

        // only a literal "0" is hidden
        let nevra = Nevra::new("foo", "00", "1.0", "2", "noarch").unwrap();
        assert_eq!(nevra.format(NevraFormat::UiNevra), "foo-00:1.0-2.noarch");
    }

    #[test]
    fn test_form_names() {
        for form in NevraFormat::ALL {
            assert_eq!(form.as_str().parse::<NevraFormat>(), Ok(form));
        }
        assert!("NEVRA".parse::<NevraFormat>().is_err());
        assert!("".parse::<NevraFormat>().is_err());
    }
}
