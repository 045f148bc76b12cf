use crate::units::{BTU_PER_KWH, thermal::Btu};

quantity!(KilowattHours, "kWh", 2);

impl From<Btu> for KilowattHours {
    fn from(btu: Btu) -> Self {
        Self(btu.0 / BTU_PER_KWH)
    }
}

impl From<KilowattHours> for Btu {
    fn from(energy: KilowattHours) -> Self {
        Self(energy.0 * BTU_PER_KWH)
    }
}
