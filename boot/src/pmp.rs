//! Physical Memory Protection profiles BOOT installs before handing off to
//! supervisor mode.
//!
//! Three mutually exclusive region sets, selected at build time by the
//! matching Cargo feature, represented as a plain data value a caller can
//! inspect and test rather than a sequence of inline CSR writes.

/// A PMP configuration ready to be written into `pmpaddr0..pmpaddr2` and
/// `pmpcfg0`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PmpConfig {
    pub pmpaddr: [u64; 3],
    pub pmpcfg0: u64,
    pub region_count: usize,
}

/// No restriction: one TOR region spanning `0` to the top of physical
/// memory, R/W/X (`pmpcfg0 = 0xf` decodes to A = TOR).
pub fn default_profile() -> PmpConfig {
    PmpConfig { pmpaddr: [0x3f_ffff_ffff_ffff, 0, 0], pmpcfg0: 0xf, region_count: 1 }
}

/// A single TOR region spanning `0` to `0x21d40000`, R/W/X (`pmpcfg0 = 0xf`
/// decodes to A = TOR).
pub fn kernelpmp1_profile() -> PmpConfig {
    PmpConfig { pmpaddr: [0x21d4_0000, 0, 0], pmpcfg0: 0xf, region_count: 1 }
}

/// Three regions carving out a narrower kernel window: entry 0 is TOR
/// (`pmpcfg0` byte `0x0F`), entries 1-2 are NAPOT (`pmpcfg0` bytes `0x1F`
/// each) — `pmpaddr0 = 0x21d80000`, `pmpaddr1 = 0x21E3FFFF`,
/// `pmpaddr2 = 0x21FBFFFF`, `pmpcfg0 = 0x1F1F0F`.
pub fn kernelpmp2_profile() -> PmpConfig {
    PmpConfig { pmpaddr: [0x21d8_0000, 0x21E3_FFFF, 0x21FB_FFFF], pmpcfg0: 0x1F1F0F, region_count: 3 }
}

/// The profile selected by this build's Cargo features. Exactly one of
/// `kernelpmp1`/`kernelpmp2` may be enabled; enabling neither selects
/// [`default_profile`].
#[cfg(all(feature = "kernelpmp1", feature = "kernelpmp2"))]
compile_error!("kernelpmp1 and kernelpmp2 are mutually exclusive");

#[cfg(feature = "kernelpmp1")]
pub fn active_profile() -> PmpConfig {
    kernelpmp1_profile()
}

#[cfg(feature = "kernelpmp2")]
pub fn active_profile() -> PmpConfig {
    kernelpmp2_profile()
}

#[cfg(not(any(feature = "kernelpmp1", feature = "kernelpmp2")))]
pub fn active_profile() -> PmpConfig {
    default_profile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_covers_all_memory_rwx() {
        let p = default_profile();
        assert_eq!(p.region_count, 1);
        assert_eq!(p.pmpcfg0 & 0xf, 0xf);
    }

    #[test]
    fn kernelpmp2_has_three_ascending_boundaries() {
        let p = kernelpmp2_profile();
        assert_eq!(p.region_count, 3);
        assert!(p.pmpaddr[0] < p.pmpaddr[1]);
        assert!(p.pmpaddr[1] < p.pmpaddr[2]);
    }

    #[test]
    fn kernelpmp1_is_a_single_region() {
        let p = kernelpmp1_profile();
        assert_eq!(p.region_count, 1);
        assert_eq!(p.pmpaddr[0], 0x21d4_0000);
    }
}
