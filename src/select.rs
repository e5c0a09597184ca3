//! Reducing collections of packages: keeping only the newest builds, or the packages a user
//! asked for by name or glob.

use std::collections::HashMap;
use std::hash::Hash;

use glob::Pattern;

use crate::Nevra;

/// Return the newest packages for each package name.
///
/// Packages of different architectures are compared against each other, so given
/// `foo-1-1.i686` and `foo-2-1.noarch` only the latter is returned.
///
/// With `keep_all_ties` set, every package whose EVR equals the newest one is returned (e.g. the
/// same build for several architectures), otherwise only the first one seen. Groups come out in
/// the order their names were first seen, and each group keeps its input order.
pub fn newest_by_name<'p, 'a: 'p, I>(packages: I, keep_all_ties: bool) -> Vec<&'p Nevra<'a>>
where
    I: IntoIterator<Item = &'p Nevra<'a>>,
{
    newest_by(packages, keep_all_ties, |pkg| pkg.name())
}

/// Return the newest packages for each (name, arch) pair.
///
/// Packages of different architectures are tracked separately, so given `foo-1-1.i386`,
/// `foo-2-1.i386` and `foo-3-1.x86_64` the last _two_ are returned.
pub fn newest_by_name_arch<'p, 'a: 'p, I>(packages: I, keep_all_ties: bool) -> Vec<&'p Nevra<'a>>
where
    I: IntoIterator<Item = &'p Nevra<'a>>,
{
    newest_by(packages, keep_all_ties, |pkg| (pkg.name(), pkg.arch()))
}

fn newest_by<'p, 'a: 'p, I, K, F>(packages: I, keep_all_ties: bool, key: F) -> Vec<&'p Nevra<'a>>
where
    I: IntoIterator<Item = &'p Nevra<'a>>,
    K: Eq + Hash,
    F: Fn(&'p Nevra<'a>) -> K,
{
    let mut groups: Vec<Vec<&'p Nevra<'a>>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for pkg in packages {
        let group = key(pkg);
        let Some(slot) = index.get(&group).copied() else {
            index.insert(group, groups.len());
            groups.push(vec![pkg]);
            continue;
        };

        let newest = &mut groups[slot];
        // the first entry of a group is always one of its newest packages
        let current = newest[0];
        if pkg.evr_gt(current) {
            log::trace!("{pkg} replaces {current} as the newest");
            newest.clear();
            newest.push(pkg);
        } else if keep_all_ties && pkg.evr_eq(current) {
            newest.push(pkg);
        }
    }

    groups.into_iter().flatten().collect()
}

/// Matches packages against a list of user supplied patterns.
///
/// A pattern matches a package when it equals, or glob-matches, any of the package's name,
/// `name-version`, `name-version-release` or `name-version-release.arch`. Globs use shell
/// wildcards: `*`, `?` and `[...]` character classes.
///
/// An empty pattern list matches everything.
#[derive(Clone, Debug)]
pub struct PackageMatcher {
    patterns: Vec<String>,
    globs: Vec<Pattern>,
}

impl PackageMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_owned()).collect();
        let globs = patterns
            .iter()
            .filter_map(|pattern| match Pattern::new(&to_glob(pattern)) {
                Ok(glob) => Some(glob),
                Err(e) => {
                    log::debug!("pattern {pattern:?} is not a valid glob, matching it exactly: {e}");
                    None
                }
            })
            .collect();

        Self { patterns, globs }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, pkg: &Nevra<'_>) -> bool {
        if self.is_empty() {
            return true;
        }

        let candidates = [pkg.name().to_owned(), pkg.nv(), pkg.nvr(), pkg.nvra()];

        // exact matches first, they are cheap
        if self
            .patterns
            .iter()
            .any(|pattern| candidates.iter().any(|candidate| candidate == pattern))
        {
            return true;
        }

        self.globs
            .iter()
            .any(|glob| candidates.iter().any(|candidate| glob.matches(candidate)))
    }
}

/// Translate a shell-style pattern into one `glob` accepts.
///
/// `glob` rejects `**` that isn't a whole path component; for plain string matching it means
/// the same as `*`. A `[` that never gets closed is a literal character in the shell, while
/// `glob` refuses the whole pattern, so it is escaped.
fn to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if glob.ends_with('*') => i += 1,
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    glob.extend(&chars[i..=end]);
                    i = end + 1;
                }
                None => {
                    glob.push_str(&Pattern::escape("["));
                    i += 1;
                }
            },
            c => {
                glob.push(c);
                i += 1;
            }
        }
    }
    glob
}

/// Index of the `]` closing the character class opened at `start`. A `]` right after the `[`
/// (or `[!`) belongs to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if chars.get(i) == Some(&'!') {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars[i.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| i + offset)
}

/// Return the packages matching any of the patterns, see [`PackageMatcher`].
///
/// The input order is preserved.
pub fn filter_by_pattern<'p, 'a: 'p, I, S>(packages: I, patterns: &[S]) -> Vec<&'p Nevra<'a>>
where
    I: IntoIterator<Item = &'p Nevra<'a>>,
    S: AsRef<str>,
{
    let matcher = PackageMatcher::new(patterns);
    packages
        .into_iter()
        .filter(|pkg| matcher.matches(pkg))
        .collect()
}
