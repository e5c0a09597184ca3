#![allow(dead_code)]

use nevra::{Epoch, Nevra};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A package with an absent epoch
pub fn pkg(
    name: &'static str,
    version: &'static str,
    release: &'static str,
    arch: &'static str,
) -> Nevra<'static> {
    Nevra::builder(name, version)
        .release(release)
        .arch(arch)
        .build()
        .expect("test package should be well formed")
}

/// A package with an explicit epoch
pub fn epkg(
    name: &'static str,
    epoch: &'static str,
    version: &'static str,
    release: &'static str,
    arch: &'static str,
) -> Nevra<'static> {
    Nevra::new(name, Epoch::from(epoch), version, release, arch)
        .expect("test package should be well formed")
}

pub fn nvras(packages: &[&Nevra<'_>]) -> Vec<String> {
    packages.iter().map(|pkg| pkg.nvra()).collect()
}
