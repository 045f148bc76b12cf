use std::ops::Mul;

use crate::units::{BTU_PER_KWH, BTU_PER_MMBTU, power::Kilowatts, time::Hours};

quantity!(BtuPerHour, "Btu/hr", 0);
quantity!(Btu, "Btu", 0);
quantity!(MegaBtu, "MMBtu", 2);

impl Mul<Hours> for BtuPerHour {
    type Output = Btu;

    fn mul(self, hours: Hours) -> Self::Output {
        Btu(self.0 * hours.0)
    }
}

impl From<Kilowatts> for BtuPerHour {
    fn from(power: Kilowatts) -> Self {
        Self(power.0 * BTU_PER_KWH)
    }
}

impl From<Btu> for MegaBtu {
    fn from(btu: Btu) -> Self {
        Self(btu.0 / BTU_PER_MMBTU)
    }
}
