use super::domain::ComfortState;

/// Upper PPD bound (inclusive) for each occupied state; anything above the
/// last bound is `Kritis`.
const PPD_BANDS: [(f64, ComfortState); 3] = [
    (10.0, ComfortState::Ideal),
    (25.0, ComfortState::Optimalisasi),
    (50.0, ComfortState::Peringatan),
];

/// Depends on PPD and occupancy only. An empty room has no one to be
/// comfortable, so it is always `BorosEnergi`.
pub fn classify(ppd: f64, occupancy: u32) -> ComfortState {
    if occupancy == 0 {
        return ComfortState::BorosEnergi;
    }

    PPD_BANDS
        .iter()
        .find(|(upper, _)| ppd <= *upper)
        .map(|(_, state)| *state)
        .unwrap_or(ComfortState::Kritis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_belong_to_the_calmer_band() {
        assert_eq!(classify(5.0, 3), ComfortState::Ideal);
        assert_eq!(classify(10.0, 3), ComfortState::Ideal);
        assert_eq!(classify(10.1, 3), ComfortState::Optimalisasi);
        assert_eq!(classify(25.0, 3), ComfortState::Optimalisasi);
        assert_eq!(classify(25.1, 3), ComfortState::Peringatan);
        assert_eq!(classify(50.0, 3), ComfortState::Peringatan);
        assert_eq!(classify(50.1, 3), ComfortState::Kritis);
        assert_eq!(classify(100.0, 3), ComfortState::Kritis);
    }

    #[test]
    fn empty_room_overrides_ppd() {
        for ppd in [5.0, 18.0, 40.0, 99.0] {
            assert_eq!(classify(ppd, 0), ComfortState::BorosEnergi);
        }
    }
}
