use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::{Epoch, Error, Evr, NevraFormat, Result};

/// Release used when none is given
pub const DEFAULT_RELEASE: &str = "1";
/// Architecture used when none is given
pub const DEFAULT_ARCH: &str = "src";

/// Package file extension stripped by [`Nevra::parse_source_package_filename`]
pub const PACKAGE_FILE_EXTENSION: &str = ".rpm";

/// A full RPM "NEVRA" consists of 5 different components - Name, Epoch, Version, Release, and Architecture.
///
/// Name is the name of the package.
///
/// Epoch, version and release together form the [`Evr`], which decides which of two builds of
/// the same package is newer.
///
/// Architecture indicates the CPU architecture that this package is intended to support, or
/// `src` for source packages.
///
/// Name, version, release and arch are never empty, and a present epoch is always a string of
/// ASCII digits. Both are checked on construction.
///
/// Packages are ordered by name (bytewise), then by EVR, then by arch (bytewise). Two packages
/// are equal when that ordering says so, which means an absent epoch on either side is not taken
/// into account.
///
/// That ordering is not transitive once absent and present epochs are mixed within a name, and
/// `slice::sort` may panic on such input. Sort with [`Nevra::cmp_normalized`] instead, which
/// treats an absent epoch as `0`.
#[derive(Clone, Debug)]
pub struct Nevra<'a> {
    name: Cow<'a, str>,
    evr: Evr<'a>,
    arch: Cow<'a, str>,
}

impl<'a> Nevra<'a> {
    /// Create a new NEVRA
    pub fn new<T: Into<Cow<'a, str>>>(
        name: T,
        epoch: impl Into<Epoch<'a>>,
        version: T,
        release: T,
        arch: T,
    ) -> Result<Nevra<'a>> {
        Self {
            name: name.into(),
            evr: Evr::new(epoch, version, release),
            arch: arch.into(),
        }
        .validate(None)
    }

    /// Start building a NEVRA from a name and version. The release defaults to `"1"`, the
    /// architecture to `"src"` and the epoch is left absent.
    pub fn builder<T: Into<Cow<'a, str>>>(name: T, version: T) -> NevraBuilder<'a> {
        NevraBuilder::new(name, version)
    }

    /// Parse a `name-version-release` string.
    ///
    /// The last two `-` separated fields are the version and release, everything before them is
    /// the name (which may itself contain dashes). The architecture is `"src"` and the epoch is
    /// left absent.
    pub fn parse_nvr(nvr: &'a str) -> Result<Self> {
        Self::parse_nvr_with(nvr, None, Epoch::Absent)
    }

    /// Parse a `name-version-release` string with the given architecture and epoch
    pub fn parse_nvr_with(
        nvr: &'a str,
        arch: Option<&'a str>,
        epoch: impl Into<Epoch<'a>>,
    ) -> Result<Self> {
        let (name, version, release) = split_nvr(nvr).ok_or_else(|| reject(nvr, NVR_EXPECTED))?;
        Self {
            name: name.into(),
            evr: Evr::new(epoch, version, release),
            arch: arch.unwrap_or(DEFAULT_ARCH).into(),
        }
        .validate(Some(nvr))
    }

    /// Parse a `name-version-release.arch` string, leaving the epoch absent
    pub fn parse_nvra(nvra: &'a str) -> Result<Self> {
        Self::parse_nvra_with(nvra, Epoch::Absent)
    }

    /// Parse a `name-version-release.arch` string with the given epoch
    pub fn parse_nvra_with(nvra: &'a str, epoch: impl Into<Epoch<'a>>) -> Result<Self> {
        // a dash after the last dot means that dot belongs to the version or release
        let (nvr, arch) = nvra
            .rsplit_once('.')
            .filter(|(_, arch)| !arch.contains('-'))
            .ok_or_else(|| reject(nvra, "missing '.arch' suffix"))?;
        let (name, version, release) =
            split_nvr(nvr).ok_or_else(|| reject(nvra, NVR_EXPECTED))?;
        Self {
            name: name.into(),
            evr: Evr::new(epoch, version, release),
            arch: arch.into(),
        }
        .validate(Some(nvra))
    }

    /// Parse a `name-[epoch:]version-release.arch` string.
    ///
    /// Unlike the other parsers, a missing epoch here becomes an explicit `"0"` rather than an
    /// absent one.
    pub fn parse_nevra(nevra: &'a str) -> Result<Self> {
        let (name, ev, ra) = split_nvr(nevra).ok_or_else(|| reject(nevra, NVR_EXPECTED))?;
        let (epoch, version) = ev.split_once(':').unwrap_or(("0", ev));
        let (release, arch) = ra
            .rsplit_once('.')
            .ok_or_else(|| reject(nevra, "missing '.arch' suffix"))?;
        Self {
            name: name.into(),
            evr: Evr::new(epoch, version, release),
            arch: arch.into(),
        }
        .validate(Some(nevra))
    }

    /// Parse a package file name such as `foo-1.0-1.src.rpm`, with or without the `.rpm`
    /// extension, leaving the epoch absent
    pub fn parse_source_package_filename(filename: &'a str) -> Result<Self> {
        let nvra = filename
            .strip_suffix(PACKAGE_FILE_EXTENSION)
            .unwrap_or(filename);
        Self::parse_nvra(nvra)
    }

    /// The name value
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The EVR
    pub fn evr(&self) -> &Evr<'a> {
        &self.evr
    }

    /// The epoch value
    pub fn epoch(&self) -> &Epoch<'a> {
        self.evr.epoch()
    }

    /// The version value
    pub fn version(&self) -> &str {
        self.evr.version()
    }

    /// The release value
    pub fn release(&self) -> &str {
        self.evr.release()
    }

    /// The arch value
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Return the name, displayed epoch, version, release and arch values as a 5-element tuple
    pub fn values(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.name,
            self.epoch().display(),
            self.version(),
            self.release(),
            &self.arch,
        )
    }

    /// Compare only the epoch, version and release of two packages, ignoring name and arch
    pub fn compare_evr(&self, other: &Nevra<'_>) -> Ordering {
        self.evr.cmp(&other.evr)
    }

    /// Compare two packages the way `rpm` does: name, EVR with an absent epoch counting as `0`,
    /// then arch.
    ///
    /// This is a total order, e.g. `packages.sort_by(Nevra::cmp_normalized)` never panics.
    pub fn cmp_normalized(&self, other: &Nevra<'_>) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.evr.cmp_normalized(&other.evr))
            .then_with(|| self.arch().cmp(other.arch()))
    }

    /// Whether both packages have the same EVR
    pub fn evr_eq(&self, other: &Nevra<'_>) -> bool {
        self.compare_evr(other) == Ordering::Equal
    }

    /// Whether this package has an older EVR than `other`
    pub fn evr_lt(&self, other: &Nevra<'_>) -> bool {
        self.compare_evr(other) == Ordering::Less
    }

    /// Whether this package has an older or the same EVR as `other`
    pub fn evr_le(&self, other: &Nevra<'_>) -> bool {
        self.compare_evr(other) != Ordering::Greater
    }

    /// Whether this package has a newer EVR than `other`
    pub fn evr_gt(&self, other: &Nevra<'_>) -> bool {
        self.compare_evr(other) == Ordering::Greater
    }

    /// Whether this package has a newer or the same EVR as `other`
    pub fn evr_ge(&self, other: &Nevra<'_>) -> bool {
        self.compare_evr(other) != Ordering::Less
    }

    /// Render one of the derived string forms, see [`NevraFormat`]
    pub fn format(&self, form: NevraFormat) -> String {
        form.render(self)
    }

    /// `name.arch`
    pub fn na(&self) -> String {
        self.format(NevraFormat::Na)
    }

    /// `name-version`
    pub fn nv(&self) -> String {
        self.format(NevraFormat::Nv)
    }

    /// `name-version-release`
    pub fn nvr(&self) -> String {
        self.format(NevraFormat::Nvr)
    }

    /// Write an NVRA string - which doesn't include the "epoch"
    ///
    /// This is the form typically used for RPM filenames.
    pub fn nvra(&self) -> String {
        self.format(NevraFormat::Nvra)
    }

    /// `name-epoch:version-release.arch`, always including the epoch
    pub fn nevra(&self) -> String {
        self.format(NevraFormat::Nevra)
    }

    /// Like [`Nevra::nevra`], but without the epoch if it displays as `"0"`
    pub fn ui_nevra(&self) -> String {
        self.format(NevraFormat::UiNevra)
    }

    /// Write an NEVRA string in a normalized form which always includes an epoch
    ///
    /// The standard string representation of a NEVRA will ignore the epoch if it displays as
    /// zero. Sometimes it is useful to write NEVRAs in a form such that equivalent values are
    /// represented identically, therefore, this "normalized" form will always include it.
    pub fn as_normalized_form(&self) -> String {
        self.nevra()
    }

    /// Whether this is an EL8 branch build, e.g. `foo-1-2.el8_3.noarch`
    pub fn is_branch_el8(&self) -> bool {
        self.release().contains("el8_")
    }

    /// Whether this is a modular build, e.g. `foo-1-2.module+el8.1.0+2940+f62455ee.noarch`
    pub fn is_module(&self) -> bool {
        self.release().contains(".module+")
    }

    /// Whether this is a rebuild, e.g. `foo-1-2.el8+4.noarch`: the release ends in a number
    /// directly preceded by `+`
    pub fn is_rebuild(&self) -> bool {
        let release = self.release();
        let without_counter = release.trim_end_matches(|c: char| c.is_ascii_digit());
        without_counter.len() < release.len() && without_counter.ends_with('+')
    }

    /// Detach the NEVRA from the string it was parsed from
    pub fn into_owned(self) -> Nevra<'static> {
        Nevra {
            name: Cow::Owned(self.name.into_owned()),
            evr: self.evr.into_owned(),
            arch: Cow::Owned(self.arch.into_owned()),
        }
    }

    fn validate(self, input: Option<&str>) -> Result<Self> {
        let reason = if self.name.is_empty() {
            Some("empty name")
        } else if !self.epoch().is_well_formed() {
            Some("epoch is not a non-negative integer")
        } else if self.version().is_empty() {
            Some("empty version")
        } else if self.version().contains(['-', ':']) {
            Some("version contains '-' or ':'")
        } else if self.release().is_empty() {
            Some("empty release")
        } else if self.release().contains('-') {
            Some("release contains '-'")
        } else if self.arch.is_empty() {
            Some("empty arch")
        } else if self.arch.contains(['-', '.']) {
            Some("arch contains '-' or '.'")
        } else {
            None
        };

        match reason {
            None => Ok(self),
            Some(reason) => {
                let identifier = input.map_or_else(|| self.nevra(), str::to_owned);
                Err(reject(&identifier, reason))
            }
        }
    }
}

const NVR_EXPECTED: &str = "expected name-version-release";

fn reject(identifier: &str, reason: &'static str) -> Error {
    log::debug!("rejecting package identifier {identifier:?}: {reason}");
    Error::malformed(identifier, reason)
}

/// split on the last two dashes
fn split_nvr(nvr: &str) -> Option<(&str, &str, &str)> {
    let mut fields = nvr.rsplitn(3, '-');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(release), Some(version), Some(name)) => Some((name, version, release)),
        _ => None,
    }
}

/// Displays the `ui_nevra` form
impl fmt::Display for Nevra<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}.{}", self.name, self.evr, self.arch)
    }
}

impl PartialEq for Nevra<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Nevra<'_> {}

impl PartialOrd for Nevra<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// See the [`Nevra`] docs: with absent and present epochs mixed this is not a total order.
impl Ord for Nevra<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let name_cmp = self.name.cmp(&other.name);
        if name_cmp != Ordering::Equal {
            return name_cmp;
        }

        let evr_cmp = self.evr.cmp(&other.evr);
        if evr_cmp != Ordering::Equal {
            return evr_cmp;
        }

        self.arch.cmp(&other.arch)
    }
}

/// Builder for a [`Nevra`], filling in the default release and architecture
#[derive(Clone, Debug)]
pub struct NevraBuilder<'a> {
    name: Cow<'a, str>,
    epoch: Epoch<'a>,
    version: Cow<'a, str>,
    release: Option<Cow<'a, str>>,
    arch: Option<Cow<'a, str>>,
}

impl<'a> NevraBuilder<'a> {
    /// Start with a name and version, an absent epoch and the default release and arch
    pub fn new<T: Into<Cow<'a, str>>>(name: T, version: T) -> Self {
        Self {
            name: name.into(),
            epoch: Epoch::Absent,
            version: version.into(),
            release: None,
            arch: None,
        }
    }

    /// Set the epoch
    pub fn epoch(mut self, epoch: impl Into<Epoch<'a>>) -> Self {
        self.epoch = epoch.into();
        self
    }

    /// Set the release, instead of `"1"`
    pub fn release(mut self, release: impl Into<Cow<'a, str>>) -> Self {
        self.release = Some(release.into());
        self
    }

    /// Set the architecture, instead of `"src"`
    pub fn arch(mut self, arch: impl Into<Cow<'a, str>>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    /// Validate the fields and build the [`Nevra`]
    pub fn build(self) -> Result<Nevra<'a>> {
        Nevra::new(
            self.name,
            self.epoch,
            self.version,
            self.release.unwrap_or(Cow::Borrowed(DEFAULT_RELEASE)),
            self.arch.unwrap_or(Cow::Borrowed(DEFAULT_ARCH)),
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Nevra<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.nevra())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Nevra<'static> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let nevra = <String as serde::Deserialize>::deserialize(deserializer)?;
        Nevra::parse_nevra(&nevra)
            .map(Nevra::into_owned)
            .map_err(serde::de::Error::custom)
    }
}
