//! Particle Data Group identifiers used by the analysis

pub const B_PLUS: i32 = 521;
pub const B_MINUS: i32 = -521;
pub const K_PLUS: i32 = 321;
pub const K_MINUS: i32 = -321;
pub const X_3872: i32 = 9120443;
pub const X_3872_BAR: i32 = -9120443;
pub const PI_ZERO: i32 = 111;
pub const PI_PLUS: i32 = 211;
pub const PI_MINUS: i32 = -211;
pub const PHOTON: i32 = 22;
pub const J_PSI: i32 = 443;
pub const PSI_2S: i32 = 100443;
pub const D_ZERO: i32 = 421;
pub const D_ZERO_BAR: i32 = -421;
pub const D_PLUS: i32 = 411;
pub const D_MINUS: i32 = -411;
pub const PROTON: i32 = 2212;
pub const ANTIPROTON: i32 = -2212;
pub const NEUTRON: i32 = 2112;
pub const ANTINEUTRON: i32 = -2112;
pub const ELECTRON: i32 = 11;
pub const POSITRON: i32 = -11;
pub const MU_MINUS: i32 = 13;
pub const MU_PLUS: i32 = -13;

/// Short display name, `"?"` for identifiers outside the table
pub fn name(id: i32) -> &'static str {
    match id {
        B_PLUS => "B+",
        B_MINUS => "B-",
        K_PLUS => "K+",
        K_MINUS => "K-",
        X_3872 => "X_3872",
        X_3872_BAR => "X_3872_bar",
        PI_ZERO => "pi0",
        PI_PLUS => "pi+",
        PI_MINUS => "pi-",
        PHOTON => "gamma",
        J_PSI => "J/psi",
        PSI_2S => "psi(2S)",
        D_ZERO => "D0",
        D_ZERO_BAR => "D0bar",
        D_PLUS => "D+",
        D_MINUS => "D-",
        PROTON => "p+",
        ANTIPROTON => "pbar-",
        NEUTRON => "n0",
        ANTINEUTRON => "nbar0",
        ELECTRON => "e-",
        POSITRON => "e+",
        MU_MINUS => "mu-",
        MU_PLUS => "mu+",
        _ => "?",
    }
}

/// Electric charge in units of e, `0` for identifiers outside the table
pub fn charge(id: i32) -> i32 {
    match id {
        B_PLUS | K_PLUS | PI_PLUS | D_PLUS | PROTON | POSITRON | MU_PLUS => 1,
        B_MINUS | K_MINUS | PI_MINUS | D_MINUS | ANTIPROTON | ELECTRON | MU_MINUS => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(name(B_PLUS), "B+");
        assert_eq!(name(X_3872_BAR), "X_3872_bar");
        assert_eq!(name(123456), "?");
    }

    #[test]
    fn test_charge() {
        assert_eq!(charge(PI_PLUS), 1);
        assert_eq!(charge(PI_MINUS), -1);
        assert_eq!(charge(MU_PLUS), 1);
        assert_eq!(charge(PHOTON), 0);
        assert_eq!(charge(X_3872), 0);
    }
}
