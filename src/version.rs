use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::{Error, Result};

/// The epoch of a package, which may or may not have been stated explicitly.
///
/// An explicit epoch of `"0"` and a missing epoch look the same when displayed, but they do not
/// compare the same way. When either side of a comparison has no epoch, the epochs are skipped
/// entirely and the comparison goes straight to the version. This is looser than `rpm` itself
/// (which treats a missing epoch as zero), and exists for the situations where some of the
/// packages being compared simply never had an epoch recorded.
///
/// A present epoch is kept in its textual form, so `"00"` and `"0"` are distinct values which
/// nonetheless compare as equal through [`compare_version_string`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Epoch<'a> {
    #[default]
    Absent,
    Present(Cow<'a, str>),
}

impl<'a> Epoch<'a> {
    /// The epoch as it is displayed: an absent epoch shows up as `"0"`
    pub fn display(&self) -> &str {
        match self {
            Epoch::Absent => "0",
            Epoch::Present(epoch) => epoch,
        }
    }

    /// The explicitly stated epoch, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Epoch::Absent => None,
            Epoch::Present(epoch) => Some(epoch),
        }
    }

    /// Whether the epoch was stated explicitly
    pub fn is_present(&self) -> bool {
        matches!(self, Epoch::Present(_))
    }

    /// Whether the epoch displays as zero, in which case the `ui_*` forms leave it out
    pub fn is_zero(&self) -> bool {
        self.display() == "0"
    }

    /// Build an epoch from the integer-or-null representation used by build systems like Koji.
    ///
    /// A null epoch becomes an explicit `"0"`, not an absent one.
    pub fn from_epochnum(epochnum: Option<u64>) -> Epoch<'static> {
        match epochnum {
            Some(num) => Epoch::Present(Cow::Owned(num.to_string())),
            None => Epoch::Present(Cow::Borrowed("0")),
        }
    }

    /// Convert to the integer-or-null representation used by build systems like Koji.
    ///
    /// An epoch displaying as `"0"` becomes `None`.
    pub fn epochnum(&self) -> Result<Option<u64>> {
        if self.is_zero() {
            return Ok(None);
        }
        let epoch = self.display();
        epoch
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::malformed(epoch, "epoch is not a non-negative integer"))
    }

    /// Detach the epoch from the string it borrows from
    pub fn into_owned(self) -> Epoch<'static> {
        match self {
            Epoch::Absent => Epoch::Absent,
            Epoch::Present(epoch) => Epoch::Present(Cow::Owned(epoch.into_owned())),
        }
    }

    /// A present epoch must be a run of ASCII digits
    pub(crate) fn is_well_formed(&self) -> bool {
        match self {
            Epoch::Absent => true,
            Epoch::Present(epoch) => {
                !epoch.is_empty() && epoch.bytes().all(|b| b.is_ascii_digit())
            }
        }
    }
}

impl<'a> From<&'a str> for Epoch<'a> {
    fn from(epoch: &'a str) -> Self {
        Epoch::Present(Cow::Borrowed(epoch))
    }
}

impl From<String> for Epoch<'_> {
    fn from(epoch: String) -> Self {
        Epoch::Present(Cow::Owned(epoch))
    }
}

impl From<u32> for Epoch<'_> {
    fn from(epoch: u32) -> Self {
        Epoch::Present(Cow::Owned(epoch.to_string()))
    }
}

impl<'a, T: Into<Epoch<'a>>> From<Option<T>> for Epoch<'a> {
    fn from(epoch: Option<T>) -> Self {
        epoch.map_or(Epoch::Absent, Into::into)
    }
}

impl fmt::Display for Epoch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// A full RPM "version" specifier has 3 different components - Epoch, Version, and Release.
///
/// Epoch overrides all other fields and is generally only used as a last resort - in cases where
/// a change to the versioning scheme or packaging error creates a situation where newer packages
/// might otherwise sort as being older. See [`Epoch`] for how a missing epoch is treated.
///
/// Version is the normal version string used by the upstream project. This shouldn't be tweaked
/// by the packager.
///
/// Release indicates firstly the number of times this package has been released - for instance,
/// with custom patches and backports not present in the upstream, but may also indicate other
/// details such as the OS it was built for (fc38, el9) or portions of a git commit hash.
///
/// Tilde (~) and caret (^) are special values used in particular situations. Including ~ in
/// a version is used for denoting pre-releases and will force it to sort as less than a version
/// without a tilde, e.g. 0.5.0 vs 0.5.0~rc1. Including ^ in a version is used for denoting snapshots
/// not directly associated with an upstream release and will force it to sort higher, e.g.
/// 0.5.0 vs 0.5.0^deadbeef
#[derive(Clone, Debug, Default)]
pub struct Evr<'a> {
    epoch: Epoch<'a>,
    version: Cow<'a, str>,
    release: Cow<'a, str>,
}

impl<'a> Evr<'a> {
    /// Create a new EVR
    pub fn new<T: Into<Cow<'a, str>>>(
        epoch: impl Into<Epoch<'a>>,
        version: T,
        release: T,
    ) -> Evr<'a> {
        Evr {
            epoch: epoch.into(),
            version: version.into(),
            release: release.into(),
        }
    }

    /// Create an EVR parsed from a string
    ///
    /// This never fails: missing pieces are left empty, and a missing `epoch:` prefix leaves
    /// the epoch absent.
    pub fn parse(evr: &'a str) -> Self {
        let (epoch, version, release) = Evr::parse_values(evr);
        Evr::new(epoch, version, release)
    }

    /// The epoch value
    pub fn epoch(&self) -> &Epoch<'a> {
        &self.epoch
    }

    /// The version value
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The release value
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Write an EVR string in a normalized form which always includes an epoch
    ///
    /// The standard string representation of an EVR will leave out the epoch if it displays as
    /// zero. Sometimes it is useful to write EVRs in a form such that equivalent values are
    /// represented identically, therefore, this "normalized" form will always include it.
    pub fn as_normalized_form(&self) -> String {
        format!("{}:{}-{}", self.epoch, self.version, self.release)
    }

    /// Return the displayed epoch, version and release values as a 3-element tuple
    pub fn values(&self) -> (&str, &str, &str) {
        (self.epoch.display(), self.version(), self.release())
    }

    /// Parse the epoch, version and release values and return them as a 3-element tuple
    pub fn parse_values(evr: &'a str) -> (Option<&'a str>, &'a str, &'a str) {
        let (epoch, vr) = match evr.split_once(':') {
            Some((epoch, vr)) => (Some(epoch), vr),
            None => (None, evr),
        };
        let (version, release) = vr.split_once('-').unwrap_or((vr, ""));

        (epoch, version, release)
    }

    /// Compare two EVRs the way `rpm` does, an absent epoch counting as `0`.
    ///
    /// Unlike [`Ord::cmp`] this is a total order, so it is safe to hand to `sort_by`.
    pub fn cmp_normalized(&self, other: &Evr<'_>) -> Ordering {
        compare_version_string(self.epoch.display(), other.epoch.display())
            .then_with(|| compare_version_string(&self.version, &other.version))
            .then_with(|| compare_version_string(&self.release, &other.release))
    }

    /// Detach the EVR from the string it was parsed from
    pub fn into_owned(self) -> Evr<'static> {
        Evr {
            epoch: self.epoch.into_owned(),
            version: Cow::Owned(self.version.into_owned()),
            release: Cow::Owned(self.release.into_owned()),
        }
    }
}

impl<'a> From<(&'a str, &'a str, &'a str)> for Evr<'a> {
    fn from(val: (&'a str, &'a str, &'a str)) -> Self {
        Evr::new(val.0, val.1, val.2)
    }
}

impl PartialEq for Evr<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Evr<'_> {}

impl fmt::Display for Evr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.epoch.is_zero() {
            write!(f, "{}:", self.epoch)?;
        }

        write!(f, "{}-{}", self.version, self.release)
    }
}

impl PartialOrd for Evr<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Epochs only take part when both sides state one. Note that this makes the ordering
/// non-transitive across a mix of absent and present epochs: `1:1.0` and `2:1.0` both compare
/// equal to an epoch-less `1.0`. Sorting such a mix with `slice::sort` may panic; use
/// [`Evr::cmp_normalized`] for that.
impl Ord for Evr<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (Epoch::Present(epoch_1), Epoch::Present(epoch_2)) = (&self.epoch, &other.epoch) {
            let epoch_cmp = compare_version_string(epoch_1, epoch_2);
            if epoch_cmp != Ordering::Equal {
                return epoch_cmp;
            }
        }

        let version_cmp = compare_version_string(&self.version, &other.version);
        if version_cmp != Ordering::Equal {
            return version_cmp;
        }

        compare_version_string(&self.release, &other.release)
    }
}

/// Compare two version (or release, or epoch) strings the way `rpmvercmp` does.
///
/// The strings are broken up into segments of all-digit or all-alphabetic ASCII characters,
/// everything else acting as a separator, and the segments are compared pairwise:
///
/// * numeric segments compare by value, ignoring leading zeroes
/// * alphabetic segments compare bytewise
/// * a numeric segment is always newer than an alphabetic one
/// * `~` sorts before anything, even the end of the string
/// * `^` sorts after the end of the string but before anything else
///
/// If all segments match, the string with segments left over is the newer one.
pub fn compare_version_string(version1: &str, version2: &str) -> Ordering {
    if version1 == version2 {
        return Ordering::Equal;
    }

    let mut version1_part = version1;
    let mut version2_part = version2;

    let not_alphanumeric_tilde_or_caret =
        |c: char| !c.is_ascii_alphanumeric() && c != '~' && c != '^';

    loop {
        // Strip any leading non-alphanumeric, non-tilde, non-caret characters
        version1_part = version1_part.trim_start_matches(not_alphanumeric_tilde_or_caret);
        version2_part = version2_part.trim_start_matches(not_alphanumeric_tilde_or_caret);

        // Tilde separator parses as "older" or lesser version
        match (
            version1_part.strip_prefix('~'),
            version2_part.strip_prefix('~'),
        ) {
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                version1_part = a;
                version2_part = b;
                continue;
            }
            _ => (),
        }

        // if two strings are equal but one is longer, the longer one is considered greater
        // ...unless it continues with a caret, which parses as a lesser version (tilde doesn't have this caveat)
        match (
            version1_part.strip_prefix('^'),
            version2_part.strip_prefix('^'),
        ) {
            (Some(_), None) => match version2_part.is_empty() {
                true => return Ordering::Greater,
                false => return Ordering::Less,
            },
            (None, Some(_)) => match version1_part.is_empty() {
                true => return Ordering::Less,
                false => return Ordering::Greater,
            },
            (Some(a), Some(b)) => {
                version1_part = a;
                version2_part = b;
                continue;
            }
            _ => (),
        }

        if version1_part.is_empty() || version2_part.is_empty() {
            break;
        }

        // the first string decides what kind of segment is compared next
        let numeric = version1_part.starts_with(|c: char| c.is_ascii_digit());
        let segment_char = |c: char| match numeric {
            true => c.is_ascii_digit(),
            false => c.is_ascii_alphabetic(),
        };

        let (segment1, rest1) = split_segment(version1_part, segment_char);
        let (segment2, rest2) = split_segment(version2_part, segment_char);

        // different kinds of segment: numeric beats alphabetic
        if segment2.is_empty() {
            return match numeric {
                true => Ordering::Greater,
                false => Ordering::Less,
            };
        }

        version1_part = rest1;
        version2_part = rest2;

        let ordering = match numeric {
            true => {
                let segment1 = segment1.trim_start_matches('0');
                let segment2 = segment2.trim_start_matches('0');
                segment1
                    .len()
                    .cmp(&segment2.len())
                    .then_with(|| segment1.cmp(segment2))
            }
            false => segment1.cmp(segment2),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    version1_part.len().cmp(&version2_part.len())
}

/// split off the leading run of characters matching the provided pattern
fn split_segment<F>(string: &str, pat: F) -> (&str, &str)
where
    F: Fn(char) -> bool,
{
    string.split_at(string.find(|c: char| !pat(c)).unwrap_or(string.len()))
}

/// Compare two strings as RPM EVR values
pub fn rpm_evr_compare(evr1: &str, evr2: &str) -> Ordering {
    let evr1 = Evr::parse(evr1);
    let evr2 = Evr::parse(evr2);
    evr1.cmp(&evr2)
}
